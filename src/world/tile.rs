//! Per-tile predicates derived from a [`WorldView`].

use crate::game::{Coord, ResourceType, Team};
use crate::world::WorldView;

/// Memoized facts about one tile for one turn.
///
/// Every predicate is a membership test against the owning view's sets, so a
/// tile state never disagrees with its view. A tile can be both a structure
/// and occupied by that structure's side; that is what a city tile is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileState {
    coord: Coord,
    units: [bool; 2],
    structure: Option<Team>,
    resource: Option<ResourceType>,
    road: bool,
    empty: bool,
    adjacent: ([Coord; 4], u8),
}

impl TileState {
    pub(super) fn build(view: &WorldView<'_>, coord: Coord) -> Self {
        let team = view.team();
        let opponent = view.opponent();

        let mut units = [false; 2];
        units[team.index()] = view.unit_position_set(team).contains(&coord);
        units[opponent.index()] = view.unit_position_set(opponent).contains(&coord);

        let structure = [team, opponent]
            .into_iter()
            .find(|&t| view.structure_position_set(t).contains(&coord));

        let cell = view.state().map.get(coord);

        Self {
            coord,
            units,
            structure,
            resource: cell
                .and_then(|c| c.resource)
                .filter(|r| r.amount > 0)
                .map(|r| r.kind),
            road: cell.is_some_and(|c| c.has_road()),
            empty: view.empty_set().contains(&coord),
            adjacent: coord.adjacent(view.width(), view.height()),
        }
    }

    /// The tile's coordinate.
    #[must_use]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Whether any unit or city tile of `team` is here.
    #[must_use]
    pub fn is_occupied_by(&self, team: Team) -> bool {
        self.has_unit_of(team) || self.structure == Some(team)
    }

    /// Whether a unit of `team` stands here.
    #[must_use]
    pub fn has_unit_of(&self, team: Team) -> bool {
        self.units[team.index()]
    }

    /// Whether the tile holds a non-exhausted resource deposit.
    #[must_use]
    pub fn is_resource(&self) -> bool {
        self.resource.is_some()
    }

    /// The kind of resource deposit here, if any.
    #[must_use]
    pub fn resource(&self) -> Option<ResourceType> {
        self.resource
    }

    /// Whether the tile has a road.
    #[must_use]
    pub fn is_road(&self) -> bool {
        self.road
    }

    /// Whether the tile is a city tile of either side.
    #[must_use]
    pub fn is_structure(&self) -> bool {
        self.structure.is_some()
    }

    /// Whether the tile is a city tile of `team`.
    #[must_use]
    pub fn is_structure_of(&self, team: Team) -> bool {
        self.structure == Some(team)
    }

    /// Whether no agent of either side is on the tile.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// In-bounds 4-neighbourhood (north, south, west, east), no wraparound.
    #[must_use]
    pub fn adjacent(&self) -> &[Coord] {
        &self.adjacent.0[..usize::from(self.adjacent.1)]
    }
}

#[cfg(test)]
mod tests {
    use crate::game::{Coord, GameState, Map, ResourceType, Team, UnitKind};
    use crate::world::WorldView;

    #[test]
    fn test_structure_tile_is_occupied_by_owner() {
        let mut state = GameState::new(Map::new(4, 4).unwrap());
        state.add_city_tile("c_1", Team(1), Coord::new(2, 2));
        let view = WorldView::new(&state, Team(0), Team(1));

        let tile = view.tile(Coord::new(2, 2)).unwrap();
        assert!(tile.is_structure());
        assert!(tile.is_structure_of(Team(1)));
        assert!(tile.is_occupied_by(Team(1)));
        assert!(!tile.is_occupied_by(Team(0)));
        assert!(!tile.has_unit_of(Team(1)));
        assert!(!tile.is_empty());
    }

    #[test]
    fn test_resource_and_road() {
        let mut state = GameState::new(Map::new(4, 4).unwrap());
        state.map.set_resource(Coord::new(0, 0), ResourceType::Uranium, 20);
        state.map.set_resource(Coord::new(1, 0), ResourceType::Wood, 0);
        state.map.set_road(Coord::new(1, 0), 0.5);
        let view = WorldView::new(&state, Team(0), Team(1));

        let uranium = view.tile(Coord::new(0, 0)).unwrap();
        assert_eq!(uranium.resource(), Some(ResourceType::Uranium));
        assert!(uranium.is_empty());

        let depleted = view.tile(Coord::new(1, 0)).unwrap();
        assert!(!depleted.is_resource());
        assert!(depleted.is_road());
    }

    #[test]
    fn test_adjacency_clipped_at_edges() {
        let state = GameState::new(Map::new(3, 3).unwrap());
        let view = WorldView::new(&state, Team(0), Team(1));
        assert_eq!(view.tile(Coord::new(0, 0)).unwrap().adjacent().len(), 2);
        assert_eq!(view.tile(Coord::new(1, 0)).unwrap().adjacent().len(), 3);
        assert_eq!(view.tile(Coord::new(1, 1)).unwrap().adjacent().len(), 4);
    }

    #[test]
    fn test_agrees_with_view() {
        let mut state = GameState::new(Map::new(5, 5).unwrap());
        state.spawn_unit(UnitKind::Worker, Team(0), Coord::new(1, 1));
        state.spawn_unit(UnitKind::Cart, Team(1), Coord::new(3, 3));
        state.add_city_tile("c_1", Team(0), Coord::new(0, 4));
        let view = WorldView::new(&state, Team(0), Team(1));

        for coord in state.map.coords() {
            let tile = view.tile(coord).unwrap();
            assert_eq!(tile.is_empty(), !view.occupied().contains(&coord));
            assert_eq!(tile.has_unit_of(Team(0)), view.unit_position_set(Team(0)).contains(&coord));
            assert_eq!(tile.has_unit_of(Team(1)), view.unit_position_set(Team(1)).contains(&coord));
        }
    }
}
