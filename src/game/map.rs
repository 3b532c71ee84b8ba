//! Map, coordinates and resource deposits.

use crate::error::MapShapeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A coordinate on the map.
///
/// `x` grows east, `y` grows south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate.
    #[must_use]
    #[inline]
    pub fn distance(self, other: Coord) -> u32 {
        u32::from(self.x.abs_diff(other.x)) + u32::from(self.y.abs_diff(other.y))
    }

    /// Get adjacent coordinates (north, south, west, east), clipped to the board.
    ///
    /// Returns a fixed-size array and count to avoid heap allocation.
    /// The array contains valid coordinates in indices 0..count.
    #[must_use]
    #[inline]
    pub fn adjacent(&self, width: u16, height: u16) -> ([Coord; 4], u8) {
        let mut result = [Coord::new(0, 0); 4];
        let mut count = 0u8;

        if self.y > 0 {
            result[count as usize] = Coord::new(self.x, self.y - 1); // north
            count += 1;
        }
        if self.y + 1 < height {
            result[count as usize] = Coord::new(self.x, self.y + 1); // south
            count += 1;
        }
        if self.x > 0 {
            result[count as usize] = Coord::new(self.x - 1, self.y); // west
            count += 1;
        }
        if self.x + 1 < width {
            result[count as usize] = Coord::new(self.x + 1, self.y); // east
            count += 1;
        }

        (result, count)
    }

    /// The coordinate one step in `direction`, or `None` if it leaves the board.
    #[must_use]
    pub fn step(self, direction: Direction, width: u16, height: u16) -> Option<Coord> {
        let next = match direction {
            Direction::North => Coord::new(self.x, self.y.checked_sub(1)?),
            Direction::South => Coord::new(self.x, self.y.checked_add(1)?),
            Direction::West => Coord::new(self.x.checked_sub(1)?, self.y),
            Direction::East => Coord::new(self.x.checked_add(1)?, self.y),
            Direction::Center => self,
        };
        (next.x < width && next.y < height).then_some(next)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Movement direction as understood by the game engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// y - 1.
    North,
    /// y + 1.
    South,
    /// x + 1.
    East,
    /// x - 1.
    West,
    /// Stay in place.
    Center,
}

impl Direction {
    /// The single-letter code used in move commands.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Direction::North => 'n',
            Direction::South => 's',
            Direction::East => 'e',
            Direction::West => 'w',
            Direction::Center => 'c',
        }
    }

    /// The direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Center => Direction::Center,
        }
    }
}

/// Type of a resource deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// Always harvestable.
    Wood,
    /// Harvestable once the coal research threshold is reached.
    Coal,
    /// Harvestable once the uranium research threshold is reached.
    Uranium,
}

impl ResourceType {
    /// All resource types in declaration order.
    pub const ALL: [ResourceType; 3] =
        [ResourceType::Wood, ResourceType::Coal, ResourceType::Uranium];

    /// Name used in observations and transfer commands.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ResourceType::Wood => "wood",
            ResourceType::Coal => "coal",
            ResourceType::Uranium => "uranium",
        }
    }

    /// Parse an observation resource name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "wood" => Some(ResourceType::Wood),
            "coal" => Some(ResourceType::Coal),
            "uranium" => Some(ResourceType::Uranium),
            _ => None,
        }
    }

    /// Index into per-resource arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resource deposit sitting on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    /// Kind of resource.
    pub kind: ResourceType,
    /// Remaining amount.
    pub amount: u32,
}

/// A single map cell.
///
/// Units and city tiles are stored separately in the game state; a cell only
/// carries terrain facts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Resource deposit, if any.
    #[serde(default)]
    pub resource: Option<Deposit>,
    /// Road level (0 = no road).
    #[serde(default)]
    pub road: f32,
}

impl Cell {
    /// Whether the cell has a road on it.
    #[must_use]
    pub fn has_road(&self) -> bool {
        self.road > 0.0
    }
}

/// The game map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMap")]
pub struct Map {
    /// Width of the map in cells.
    width: u16,
    /// Height of the map in cells.
    height: u16,
    /// Cells stored in row-major order.
    cells: Vec<Cell>,
}

/// Unchecked wire shape of [`Map`].
#[derive(Deserialize)]
struct RawMap {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl TryFrom<RawMap> for Map {
    type Error = MapShapeError;

    fn try_from(raw: RawMap) -> Result<Self, Self::Error> {
        let expected = usize::from(raw.width) * usize::from(raw.height);
        if expected == 0 || raw.cells.len() != expected {
            return Err(MapShapeError {
                width: raw.width,
                height: raw.height,
                cells: raw.cells.len(),
            });
        }
        Ok(Self {
            width: raw.width,
            height: raw.height,
            cells: raw.cells,
        })
    }
}

impl Map {
    /// Create a new empty map.
    ///
    /// Returns `None` if width or height is zero.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        let size = usize::from(width) * usize::from(height);
        Some(Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        })
    }

    /// Get the width of the map.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the height of the map.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of cells on the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the map has no cells (never true for a constructed map).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check if a coordinate is within the map bounds.
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Convert a coordinate to an index into the cells array.
    #[must_use]
    pub fn index_of(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(usize::from(coord.y) * usize::from(self.width) + usize::from(coord.x))
        } else {
            None
        }
    }

    /// Get a reference to the cell at the given coordinate.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<&Cell> {
        self.index_of(coord).map(|idx| &self.cells[idx])
    }

    /// Get a mutable reference to the cell at the given coordinate.
    #[must_use]
    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        self.index_of(coord).map(|idx| &mut self.cells[idx])
    }

    /// Place a resource deposit. Returns `false` if out of bounds.
    pub fn set_resource(&mut self, coord: Coord, kind: ResourceType, amount: u32) -> bool {
        match self.get_mut(coord) {
            Some(cell) => {
                cell.resource = Some(Deposit { kind, amount });
                true
            }
            None => false,
        }
    }

    /// Set the road level. Returns `false` if out of bounds.
    pub fn set_road(&mut self, coord: Coord, road: f32) -> bool {
        match self.get_mut(coord) {
            Some(cell) => {
                cell.road = road;
                true
            }
            None => false,
        }
    }

    /// Iterate over all coordinates and cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell)> {
        let width = usize::from(self.width);
        self.cells.iter().enumerate().map(move |(idx, cell)| {
            #[allow(clippy::cast_possible_truncation)]
            let coord = Coord::new((idx % width) as u16, (idx / width) as u16);
            (coord, cell)
        })
    }

    /// Iterate over all coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Coord::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_adjacent() {
        let coord = Coord::new(5, 5);
        let (adj, count) = coord.adjacent(10, 10);
        let adj_slice = &adj[..count as usize];
        assert_eq!(count, 4);
        assert!(adj_slice.contains(&Coord::new(5, 4)));
        assert!(adj_slice.contains(&Coord::new(5, 6)));
        assert!(adj_slice.contains(&Coord::new(4, 5)));
        assert!(adj_slice.contains(&Coord::new(6, 5)));
    }

    #[test]
    fn test_coord_adjacent_corner() {
        let (adj, count) = Coord::new(0, 0).adjacent(10, 10);
        let adj_slice = &adj[..count as usize];
        assert_eq!(count, 2);
        assert!(adj_slice.contains(&Coord::new(0, 1)));
        assert!(adj_slice.contains(&Coord::new(1, 0)));

        let (_, count) = Coord::new(9, 9).adjacent(10, 10);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_step_clips_to_board() {
        let origin = Coord::new(0, 0);
        assert_eq!(origin.step(Direction::North, 4, 4), None);
        assert_eq!(origin.step(Direction::West, 4, 4), None);
        assert_eq!(origin.step(Direction::South, 4, 4), Some(Coord::new(0, 1)));
        assert_eq!(Coord::new(3, 0).step(Direction::East, 4, 4), None);
    }

    #[test]
    fn test_distance() {
        assert_eq!(Coord::new(1, 1).distance(Coord::new(4, 3)), 5);
        assert_eq!(Coord::new(4, 3).distance(Coord::new(1, 1)), 5);
    }

    #[test]
    fn test_map_zero_size() {
        assert!(Map::new(0, 10).is_none());
        assert!(Map::new(10, 0).is_none());
    }

    #[test]
    fn test_map_iteration_is_row_major() {
        let map = Map::new(3, 2).unwrap();
        let coords: Vec<Coord> = map.iter().map(|(c, _)| c).collect();
        assert_eq!(coords, map.coords().collect::<Vec<_>>());
        assert_eq!(coords[1], Coord::new(1, 0));
        assert_eq!(coords[3], Coord::new(0, 1));
    }

    #[test]
    fn test_map_rejects_bad_shape() {
        let json = r#"{"width":2,"height":2,"cells":[{},{},{}]}"#;
        assert!(serde_json::from_str::<Map>(json).is_err());

        let json = r#"{"width":2,"height":1,"cells":[{},{"road":1.0}]}"#;
        let map: Map = serde_json::from_str(json).unwrap();
        assert!(map.get(Coord::new(1, 0)).unwrap().has_road());
    }

    #[test]
    fn test_resource_names() {
        for kind in ResourceType::ALL {
            assert_eq!(ResourceType::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ResourceType::from_name("gold"), None);
    }
}
