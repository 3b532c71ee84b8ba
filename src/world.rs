//! Turn-scoped derived views over a board snapshot.
//!
//! A [`WorldView`] borrows the snapshot for exactly one decision pass. Every
//! accessor computes its answer on first use and hands back the same memoized
//! value afterwards. The view cannot outlive the borrow, so a view built for
//! turn N can never be consulted during turn N+1.

mod tile;

pub use tile::TileState;

use crate::game::{CityTile, Coord, GameConstants, GameState, ResourceType, Team, Unit, UnitKind};
use std::cell::OnceCell;
use std::collections::HashSet;

/// Per-side memoized collections.
#[derive(Debug, Default)]
struct SideCache<'a> {
    units: OnceCell<Vec<usize>>,
    workers: OnceCell<Vec<usize>>,
    carts: OnceCell<Vec<usize>>,
    unit_ids: OnceCell<Vec<&'a str>>,
    unit_positions: OnceCell<Vec<Coord>>,
    unit_position_set: OnceCell<HashSet<Coord>>,
    structures: OnceCell<Vec<usize>>,
    structure_order: OnceCell<Vec<usize>>,
    structure_positions: OnceCell<Vec<Coord>>,
    structure_position_set: OnceCell<HashSet<Coord>>,
    harvestable: OnceCell<Vec<Coord>>,
}

/// Derived, read-only, turn-scoped queries over a [`GameState`].
#[derive(Debug)]
pub struct WorldView<'a> {
    state: &'a GameState,
    team: Team,
    opponent: Team,
    sides: [SideCache<'a>; 2],
    resources: [OnceCell<Vec<Coord>>; 3],
    roads: OnceCell<Vec<Coord>>,
    occupied: OnceCell<HashSet<Coord>>,
    empty: OnceCell<Vec<Coord>>,
    empty_set: OnceCell<HashSet<Coord>>,
    buildable: OnceCell<Vec<Coord>>,
    tiles: Vec<OnceCell<TileState>>,
}

impl<'a> WorldView<'a> {
    /// Build a view for `team` playing against `opponent`.
    #[must_use]
    pub fn new(state: &'a GameState, team: Team, opponent: Team) -> Self {
        Self {
            state,
            team,
            opponent,
            sides: [SideCache::default(), SideCache::default()],
            resources: [OnceCell::new(), OnceCell::new(), OnceCell::new()],
            roads: OnceCell::new(),
            occupied: OnceCell::new(),
            empty: OnceCell::new(),
            empty_set: OnceCell::new(),
            buildable: OnceCell::new(),
            tiles: (0..state.map.len()).map(|_| OnceCell::new()).collect(),
        }
    }

    /// The snapshot this view was built from.
    #[must_use]
    pub fn state(&self) -> &'a GameState {
        self.state
    }

    /// The controlling side.
    #[must_use]
    pub fn team(&self) -> Team {
        self.team
    }

    /// The opposing side.
    #[must_use]
    pub fn opponent(&self) -> Team {
        self.opponent
    }

    /// Rule constants of the snapshot.
    #[must_use]
    pub fn constants(&self) -> &'a GameConstants {
        &self.state.constants
    }

    /// Board width.
    #[must_use]
    pub fn width(&self) -> u16 {
        self.state.map.width()
    }

    /// Board height.
    #[must_use]
    pub fn height(&self) -> u16 {
        self.state.map.height()
    }

    /// Unit stored at arena index `idx`.
    #[must_use]
    pub fn unit(&self, idx: usize) -> &'a Unit {
        &self.state.units[idx]
    }

    /// City tile stored at arena index `idx`.
    #[must_use]
    pub fn structure(&self, idx: usize) -> &'a CityTile {
        &self.state.city_tiles[idx]
    }

    fn side(&self, team: Team) -> &SideCache<'a> {
        &self.sides[team.index()]
    }

    // === Mobile units ===

    /// Arena indices of `team`'s units, in board-enumeration order.
    #[must_use]
    pub fn units(&self, team: Team) -> &[usize] {
        self.side(team).units.get_or_init(|| {
            self.state
                .units
                .iter()
                .enumerate()
                .filter(|(_, u)| u.team == team)
                .map(|(i, _)| i)
                .collect()
        })
    }

    fn units_of_kind(&self, team: Team, kind: UnitKind) -> Vec<usize> {
        self.units(team)
            .iter()
            .copied()
            .filter(|&i| self.state.units[i].kind == kind)
            .collect()
    }

    /// Arena indices of `team`'s workers.
    #[must_use]
    pub fn workers(&self, team: Team) -> &[usize] {
        self.side(team)
            .workers
            .get_or_init(|| self.units_of_kind(team, UnitKind::Worker))
    }

    /// Arena indices of `team`'s carts.
    #[must_use]
    pub fn carts(&self, team: Team) -> &[usize] {
        self.side(team)
            .carts
            .get_or_init(|| self.units_of_kind(team, UnitKind::Cart))
    }

    /// Identifiers of `team`'s units.
    #[must_use]
    pub fn unit_ids(&self, team: Team) -> &[&'a str] {
        self.side(team).unit_ids.get_or_init(|| {
            self.units(team)
                .iter()
                .map(|&i| self.state.units[i].id.as_str())
                .collect()
        })
    }

    /// Positions of `team`'s units, in board-enumeration order.
    #[must_use]
    pub fn unit_positions(&self, team: Team) -> &[Coord] {
        self.side(team).unit_positions.get_or_init(|| {
            self.units(team)
                .iter()
                .map(|&i| self.state.units[i].pos)
                .collect()
        })
    }

    /// Set of tiles holding at least one of `team`'s units.
    #[must_use]
    pub fn unit_position_set(&self, team: Team) -> &HashSet<Coord> {
        self.side(team)
            .unit_position_set
            .get_or_init(|| self.unit_positions(team).iter().copied().collect())
    }

    // === Structures ===

    /// Arena indices of `team`'s city tiles, in snapshot order.
    #[must_use]
    pub fn structures(&self, team: Team) -> &[usize] {
        self.side(team).structures.get_or_init(|| {
            self.state
                .city_tiles
                .iter()
                .enumerate()
                .filter(|(_, t)| t.team == team)
                .map(|(i, _)| i)
                .collect()
        })
    }

    /// Arena indices of `team`'s city tiles in evaluation order:
    /// stable-sorted by city id, then row, then column.
    #[must_use]
    pub fn structure_order(&self, team: Team) -> &[usize] {
        self.side(team).structure_order.get_or_init(|| {
            let mut order = self.structures(team).to_vec();
            order.sort_by_key(|&idx| {
                let tile = &self.state.city_tiles[idx];
                (tile.city_id.as_str(), tile.pos.y, tile.pos.x)
            });
            order
        })
    }

    /// Positions of `team`'s city tiles, in snapshot order.
    #[must_use]
    pub fn structure_positions(&self, team: Team) -> &[Coord] {
        self.side(team).structure_positions.get_or_init(|| {
            self.structures(team)
                .iter()
                .map(|&i| self.state.city_tiles[i].pos)
                .collect()
        })
    }

    /// Set of tiles holding one of `team`'s city tiles.
    #[must_use]
    pub fn structure_position_set(&self, team: Team) -> &HashSet<Coord> {
        self.side(team)
            .structure_position_set
            .get_or_init(|| self.structure_positions(team).iter().copied().collect())
    }

    // === Tiles ===

    /// Tiles holding a deposit of `kind`, in row-major order.
    #[must_use]
    pub fn resource_tiles(&self, kind: ResourceType) -> &[Coord] {
        self.resources[kind.index()].get_or_init(|| {
            self.state
                .map
                .iter()
                .filter(|(_, cell)| cell.resource.is_some_and(|r| r.kind == kind && r.amount > 0))
                .map(|(coord, _)| coord)
                .collect()
        })
    }

    /// Resource tiles `team` has the research to harvest, in row-major order.
    #[must_use]
    pub fn harvestable_tiles(&self, team: Team) -> &[Coord] {
        self.side(team).harvestable.get_or_init(|| {
            self.state
                .map
                .iter()
                .filter(|(_, cell)| {
                    cell.resource.is_some_and(|r| {
                        r.amount > 0 && self.state.can_harvest(team, r.kind)
                    })
                })
                .map(|(coord, _)| coord)
                .collect()
        })
    }

    /// Tiles with a road, in row-major order.
    #[must_use]
    pub fn road_tiles(&self) -> &[Coord] {
        self.roads.get_or_init(|| {
            self.state
                .map
                .iter()
                .filter(|(_, cell)| cell.has_road())
                .map(|(coord, _)| coord)
                .collect()
        })
    }

    /// Tiles occupied by any unit or city tile of either side.
    #[must_use]
    pub fn occupied(&self) -> &HashSet<Coord> {
        self.occupied.get_or_init(|| {
            [self.team, self.opponent]
                .into_iter()
                .flat_map(|team| {
                    self.unit_positions(team)
                        .iter()
                        .chain(self.structure_positions(team))
                        .copied()
                })
                .collect()
        })
    }

    /// Tiles not occupied by any agent, in row-major order.
    #[must_use]
    pub fn empty_tiles(&self) -> &[Coord] {
        self.empty.get_or_init(|| {
            let occupied = self.occupied();
            self.state
                .map
                .coords()
                .filter(|c| !occupied.contains(c))
                .collect()
        })
    }

    /// Set form of [`WorldView::empty_tiles`].
    #[must_use]
    pub fn empty_set(&self) -> &HashSet<Coord> {
        self.empty_set
            .get_or_init(|| self.empty_tiles().iter().copied().collect())
    }

    /// Empty tiles without a resource deposit: where a city can be founded.
    #[must_use]
    pub fn buildable_tiles(&self) -> &[Coord] {
        self.buildable.get_or_init(|| {
            self.empty_tiles()
                .iter()
                .copied()
                .filter(|&c| {
                    self.state
                        .map
                        .get(c)
                        .is_some_and(|cell| cell.resource.is_none_or(|r| r.amount == 0))
                })
                .collect()
        })
    }

    /// Memoized predicates for one tile, or `None` if `coord` is off the board.
    #[must_use]
    pub fn tile(&self, coord: Coord) -> Option<&TileState> {
        let idx = self.state.map.index_of(coord)?;
        Some(self.tiles[idx].get_or_init(|| TileState::build(self, coord)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Map;

    fn create_test_state() -> GameState {
        let mut state = GameState::new(Map::new(6, 6).unwrap());
        state.map.set_resource(Coord::new(0, 0), ResourceType::Wood, 100);
        state.map.set_resource(Coord::new(5, 0), ResourceType::Coal, 100);
        state.map.set_resource(Coord::new(3, 3), ResourceType::Wood, 0);
        state.map.set_road(Coord::new(2, 2), 1.5);
        state.add_city_tile("c_2", Team(0), Coord::new(4, 4));
        state.add_city_tile("c_1", Team(0), Coord::new(1, 4));
        state.add_city_tile("c_1", Team(0), Coord::new(0, 4));
        state.add_city_tile("c_3", Team(1), Coord::new(5, 5));
        state.spawn_unit(UnitKind::Worker, Team(0), Coord::new(1, 1));
        state.spawn_unit(UnitKind::Cart, Team(0), Coord::new(2, 1));
        state.spawn_unit(UnitKind::Worker, Team(1), Coord::new(4, 1));
        state
    }

    #[test]
    fn test_units_by_side_and_kind() {
        let state = create_test_state();
        let view = WorldView::new(&state, Team(0), Team(1));
        assert_eq!(view.units(Team(0)), &[0, 1]);
        assert_eq!(view.workers(Team(0)), &[0]);
        assert_eq!(view.carts(Team(0)), &[1]);
        assert_eq!(view.units(Team(1)), &[2]);
        assert_eq!(view.unit_ids(Team(1)), &["u_3"]);
        assert!(view.carts(Team(1)).is_empty());
    }

    #[test]
    fn test_structure_order_is_stable() {
        let state = create_test_state();
        let view = WorldView::new(&state, Team(0), Team(1));
        assert_eq!(view.structures(Team(0)), &[0, 1, 2]);
        // c_1 before c_2; within c_1, same row so west first.
        assert_eq!(view.structure_order(Team(0)), &[2, 1, 0]);
    }

    #[test]
    fn test_resource_partition() {
        let state = create_test_state();
        let view = WorldView::new(&state, Team(0), Team(1));
        assert_eq!(view.resource_tiles(ResourceType::Wood), &[Coord::new(0, 0)]);
        assert_eq!(view.resource_tiles(ResourceType::Coal), &[Coord::new(5, 0)]);
        assert!(view.resource_tiles(ResourceType::Uranium).is_empty());
        // Coal is not researched yet.
        assert_eq!(view.harvestable_tiles(Team(0)), &[Coord::new(0, 0)]);
        assert_eq!(view.road_tiles(), &[Coord::new(2, 2)]);
    }

    #[test]
    fn test_occupied_and_empty_are_complements() {
        let state = create_test_state();
        let view = WorldView::new(&state, Team(0), Team(1));
        assert_eq!(view.occupied().len(), 7);
        assert_eq!(view.empty_tiles().len(), 36 - 7);
        for coord in state.map.coords() {
            assert_ne!(view.occupied().contains(&coord), view.empty_set().contains(&coord));
        }
        assert!(!view.buildable_tiles().contains(&Coord::new(0, 0)));
    }

    #[test]
    fn test_accessors_are_memoized() {
        let state = create_test_state();
        let view = WorldView::new(&state, Team(0), Team(1));
        let first = view.empty_tiles().as_ptr();
        let second = view.empty_tiles().as_ptr();
        assert_eq!(first, second);

        let a: *const TileState = view.tile(Coord::new(1, 1)).unwrap();
        let b: *const TileState = view.tile(Coord::new(1, 1)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_board_queries() {
        let state = GameState::new(Map::new(3, 3).unwrap());
        let view = WorldView::new(&state, Team(0), Team(1));
        assert!(view.units(Team(0)).is_empty());
        assert!(view.structures(Team(1)).is_empty());
        assert!(view.occupied().is_empty());
        assert_eq!(view.empty_tiles().len(), 9);
        assert!(view.tile(Coord::new(3, 0)).is_none());
    }
}
