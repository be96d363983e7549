//! Hexagonal boards with overlaid coordinate systems.
//!
//! Maps are addressed by [`Location`]s, i.e. offset coordinates of a
//! flat-top board. All geometric work (adjacency, distance, ranges) is
//! done in [`Cube`] coordinates, into which every location embeds.
pub mod cube;
pub mod location;

pub use self::cube::*;
pub use self::location::Location;

/// Iterate over the neighbouring (adjacent) locations, in the
/// order of the flat-top [`Direction`]s.
pub fn neighbours(loc: Location) -> impl Iterator<Item=Location> + Clone {
    Cube::from(loc).neighbours().map(Location::from)
}

/// The distance between two locations, i.e. the number of steps
/// on the shortest walk between them.
pub fn distance(from: Location, to: Location) -> u32 {
    Cube::from(from).distance(Cube::from(to))
}

/// Whether two locations are adjacent.
pub fn adjacent(a: Location, b: Location) -> bool {
    distance(a, b) == 1
}

/// The locations within the given range of `center`, including `center`.
pub fn range(center: Location, r: u16) -> impl Iterator<Item=Location> {
    Cube::from(center).range(r).map(Location::from)
}
