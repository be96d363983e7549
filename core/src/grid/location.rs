//! Offset coordinates of map locations.

use std::fmt;

use super::cube::Cube;

/// A location on a map, in "odd-q" offset coordinates: columns are
/// numbered from left to right and rows from top to bottom, with the
/// odd columns pushed down by half a hexagon, as on a flat-top board.
///
/// Guide: [Offset Coordinates]
///
/// [Offset Coordinates]: https://www.redblobgames.com/grids/hexagons/#coordinates-offset
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    pub fn new(x: i32, y: i32) -> Location {
        Location { x, y }
    }
}

impl From<Cube> for Location {
    fn from(c: Cube) -> Self {
        let x = c.x();
        let y = c.z() + (x - (x & 1)) / 2;
        Location { x, y }
    }
}

impl From<Location> for Cube {
    fn from(l: Location) -> Cube {
        let z = l.y - (l.x - (l.x & 1)) / 2;
        Cube::new(l.x, z)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
