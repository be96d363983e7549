//! Movement and reachability search for units on hexagonal maps.
//!
//! The [`grid`] module provides the coordinates and [`world`] the narrow
//! view of the game that the searches consume. Steps are priced by the
//! calculators of [`cost`] and searched by [`search::astar`] (one
//! destination) or [`paths`] (every destination within some turns).
//! [`turns`] annotates a route with the turns it takes, and [`area`]
//! answers simpler questions about the surroundings of a location.

extern crate either;
extern crate nalgebra;
extern crate num_traits;
#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate log;
#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
extern crate rand;

pub mod area;
pub mod cost;
pub mod grid;
pub mod paths;
pub mod search;
pub mod turns;
pub mod world;

#[cfg(test)]
mod testing;

pub use crate::area::{ find_vacant_tile, get_tiles_radius, tiles_radius, Vacancy };
pub use crate::cost::{ route_with_fallback, Calculator, CostOptions, Dummy, Emergency, ShortestPath };
pub use crate::grid::Location;
pub use crate::paths::{ Paths, ReachOptions };
pub use crate::search::{ CostCalculator, Route, Waypoint, Window };
pub use crate::search::astar::a_star_search;
pub use crate::turns::route_turns_to_complete;
pub use crate::world::enemy_zoc;
