//! Cube coordinates, in which adjacency and distance are simple.

use nalgebra::{ Point3, Vector3 };
use num_traits::cast::FromPrimitive;

use std::cmp::{ max, min };

/// A point `(x, y, z)` on the plane `x + y + z = 0` of a cube grid.
///
/// Every hexagon of a board is identified with the cube whose projection
/// onto that plane it is. Moving to an adjacent hexagon changes two of
/// the coordinates by one in opposite directions, so the distance of two
/// hexagons is the largest difference of their coordinates.
///
/// Guide: [Cube coordinates]
///
/// [Cube coordinates]: https://www.redblobgames.com/grids/hexagons/#coordinates-cube
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct Cube(Point3<i32>);

impl Cube {
    /// The cube with the given `x` and `z`, `y` being implied.
    pub fn new(x: i32, z: i32) -> Cube {
        Cube(Point3::new(x, -x - z, z))
    }

    pub fn x(&self) -> i32 { self.0.coords.x }
    pub fn y(&self) -> i32 { self.0.coords.y }
    pub fn z(&self) -> i32 { self.0.coords.z }

    /// The adjacent cube in the given direction.
    pub fn step(self, dir: Direction) -> Cube {
        Cube(self.0 + dir.offset())
    }

    /// The adjacent cubes, in the order of [`Direction::all`].
    pub fn neighbours(self) -> impl Iterator<Item=Cube> + Clone {
        Direction::all().map(move |d| self.step(d))
    }

    pub fn distance(&self, other: Cube) -> u32 {
        let d = self.0 - other.0;
        max(d.x.abs(), max(d.y.abs(), d.z.abs())) as u32
    }

    /// The cubes within distance `r`, including `self`, column by column.
    pub fn range(self, r: u16) -> impl Iterator<Item=Cube> {
        let r = i32::from(r);
        (-r ..= r).flat_map(move |dx| {
            (max(-r, -dx - r) ..= min(r, -dx + r)).map(move |dy|
                Cube(self.0 + Vector3::new(dx, dy, -dx - dy)))
        })
    }

    /// The number of cubes within distance `r`.
    pub fn range_size(r: u16) -> usize {
        let r = r as usize;
        1 + 3 * r * (r + 1)
    }
}

/// The sides of a flat-top hexagon, clockwise from the top.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
#[derive(FromPrimitive)]
pub enum Direction {
    North,
    NorthEast,
    SouthEast,
    South,
    SouthWest,
    NorthWest,
}

impl Direction {
    /// The `i`-th direction, counting clockwise from `North` and
    /// wrapping around.
    pub fn nth(i: usize) -> Direction {
        Direction::from_usize(i % 6).unwrap_or(Direction::North)
    }

    pub fn all() -> impl Iterator<Item=Direction> + Clone {
        (0 .. 6).map(Direction::nth)
    }

    pub fn opposite(self) -> Direction {
        Direction::nth(self as usize + 3)
    }

    /// The displacement of a step in this direction.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            Direction::North     => Vector3::new( 0,  1, -1),
            Direction::NorthEast => Vector3::new( 1,  0, -1),
            Direction::SouthEast => Vector3::new( 1, -1,  0),
            Direction::South     => Vector3::new( 0, -1,  1),
            Direction::SouthWest => Vector3::new(-1,  0,  1),
            Direction::NorthWest => Vector3::new(-1,  1,  0),
        }
    }
}
