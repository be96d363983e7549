//! Cost-aware searches across a map.
//!
//! A search is driven by a [`CostCalculator`], which prices every step
//! a unit might take, and yields [`Route`]s. See [`astar`] for routes to
//! a single destination and [`crate::paths`] for every destination a
//! unit can reach.

pub mod astar;

use crate::grid::{ self, Location };

use either::Either;

use std::collections::{ HashMap, HashSet };
use std::fmt;

/// The cost calculator of a search prices the steps of a route.
///
/// The integral part of a cost is counted in movement points, while
/// any fractional part only expresses a preference between routes of
/// equal movement cost. Bounds on a search (stop thresholds and turn
/// horizons) therefore compare the integral part only.
pub trait CostCalculator {
    /// The cost of stepping from `from` onto the adjacent (or teleport
    /// linked) `to`, having spent `so_far` on the route up to `from`,
    /// or `None` if the step is forbidden.
    ///
    /// Costs may depend on `so_far`, e.g. a unit that has to stop in a
    /// zone of control pays whatever movement it has left in the turn.
    /// A cost must be deterministic in its three arguments and must
    /// never be smaller than 1.
    fn cost(&self, from: Location, to: Location, so_far: f64) -> Option<f64>;

    /// The movement that the searching unit has left, used to work out
    /// the movement remaining at the end of a route.
    fn max_cost(&self) -> u32 {
        0
    }

    /// An estimate of the cost from `from` to `to` that must never exceed
    /// the actual cost.
    fn heuristic(&self, from: Location, to: Location) -> f64 {
        grid::distance(from, to) as f64
    }
}

impl<'c, C: CostCalculator + ?Sized> CostCalculator for &'c C {
    fn cost(&self, from: Location, to: Location, so_far: f64) -> Option<f64> {
        (**self).cost(from, to, so_far)
    }
    fn max_cost(&self) -> u32 {
        (**self).max_cost()
    }
    fn heuristic(&self, from: Location, to: Location) -> f64 {
        (**self).heuristic(from, to)
    }
}

/// Annotations of a location on a route.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    /// The number of turns spent once the unit stops here.
    pub turns: u32,
    /// Whether the unit stops here because of an enemy zone of control.
    pub zoc: bool,
    /// Whether stopping here captures a village.
    pub capture: bool,
    /// Whether the unit is invisible to the observer here.
    pub invisible: bool,
}

impl Waypoint {
    pub fn new(turns: u32) -> Waypoint {
        Waypoint { turns, ..Waypoint::default() }
    }
}

/// A route from one location to another.
///
/// An empty route signals that no route was found.
#[derive(PartialEq, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// The locations of the route, from start to destination inclusive.
    pub steps: Vec<Location>,
    /// The movement the unit has left at the end of the route, in the
    /// turn in which it arrives.
    pub move_left: u32,
    /// The locations at which the unit stops, i.e. where a turn ends
    /// and (once annotated) the destination.
    #[cfg_attr(feature = "serde", serde(with = "waypoint_pairs"))]
    pub waypoints: HashMap<Location, Waypoint>,
}

/// Waypoints as a sequence of `(location, waypoint)` pairs, ordered by
/// location, since locations are no valid map keys in most formats.
#[cfg(feature = "serde")]
mod waypoint_pairs {
    use std::collections::HashMap;

    use serde::{ Deserialize, Deserializer, Serialize, Serializer };

    use crate::grid::Location;
    use super::Waypoint;

    pub fn serialize<S>(wps: &HashMap<Location, Waypoint>, s: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        let mut pairs = wps.iter().map(|(l, w)| (*l, *w)).collect::<Vec<_>>();
        pairs.sort_by_key(|(l, _)| *l);
        pairs.serialize(s)
    }

    pub fn deserialize<'de, D>(d: D) -> Result<HashMap<Location, Waypoint>, D::Error>
    where D: Deserializer<'de> {
        let pairs = Vec::<(Location, Waypoint)>::deserialize(d)?;
        Ok(pairs.into_iter().collect())
    }
}

impl Route {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn start(&self) -> Option<Location> {
        self.steps.first().copied()
    }

    pub fn destination(&self) -> Option<Location> {
        self.steps.last().copied()
    }

    /// The waypoints of the route in the order in which they are
    /// passed.
    pub fn ordered_waypoints(&self) -> impl Iterator<Item=(Location, Waypoint)> + '_ {
        self.steps.iter().filter_map(move |l| self.waypoints.get(l).map(|w| (*l, *w)))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, l) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", l)?;
            if let Some(w) = self.waypoints.get(l) {
                write!(f, "[{}]", w.turns)?;
            }
        }
        write!(f, " [move_left {}]", self.move_left)
    }
}

/// A rectangular region of the map to which a search is confined.
///
/// Locations outside the window are never explored, even if a cheaper
/// route passes through them. A narrow window thus trades accuracy for
/// bounded work on large maps and may miss routes altogether.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Window {
    min: Location,
    width: i32,
    height: i32,
}

impl Window {
    /// The window covering a whole map of the given dimensions.
    pub fn new(width: i32, height: i32) -> Window {
        Window { min: Location::new(0, 0), width, height }
    }

    /// The window covering the bounding box of `a` and `b`, enlarged
    /// by `margin` locations in every direction.
    pub fn around(a: Location, b: Location, margin: i32) -> Window {
        let min = Location::new(a.x.min(b.x) - margin, a.y.min(b.y) - margin);
        Window {
            min,
            width: a.x.max(b.x) + margin + 1 - min.x,
            height: a.y.max(b.y) + margin + 1 - min.y,
        }
    }

    pub fn contains(&self, loc: Location) -> bool {
        loc.x >= self.min.x && loc.x < self.min.x + self.width &&
        loc.y >= self.min.y && loc.y < self.min.y + self.height
    }
}

/// The locations that are considered adjacent to `loc`: the grid
/// neighbours plus, if `loc` is a teleport location, all other teleport
/// locations.
pub(crate) fn adjacent<'t>(
    loc: Location,
    teleports: Option<&'t HashSet<Location>>
) -> impl Iterator<Item=Location> + 't {
    let ns = grid::neighbours(loc);
    match teleports.filter(|ts| ts.contains(&loc)) {
        None     => Either::Left(ns),
        Some(ts) => {
            let mut links = ts.iter().copied().filter(|t| *t != loc).collect::<Vec<_>>();
            links.sort();
            Either::Right(ns.chain(links))
        }
    }
}

/// The movement points of a cost, i.e. its integral part.
pub(crate) fn movement_points(cost: f64) -> u32 {
    cost.max(0.).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_around() {
        let w = Window::around(Location::new(2, 5), Location::new(6, 1), 1);
        assert!(w.contains(Location::new(1, 0)));
        assert!(w.contains(Location::new(7, 6)));
        assert!(!w.contains(Location::new(8, 3)));
        assert!(!w.contains(Location::new(4, -1)));
    }

    #[test]
    fn test_window_new() {
        let w = Window::new(3, 2);
        assert!(w.contains(Location::new(0, 0)));
        assert!(w.contains(Location::new(2, 1)));
        assert!(!w.contains(Location::new(3, 1)));
        assert!(!w.contains(Location::new(0, -1)));
    }

    #[test]
    fn test_adjacent_teleports() {
        let ts = [Location::new(0, 0), Location::new(9, 9), Location::new(5, 0)]
            .iter().copied().collect::<HashSet<_>>();
        let from_link = adjacent(Location::new(0, 0), Some(&ts)).collect::<Vec<_>>();
        assert_eq!(from_link.len(), 8);
        assert_eq!(&from_link[6..], &[Location::new(5, 0), Location::new(9, 9)]);
        assert_eq!(adjacent(Location::new(3, 3), Some(&ts)).count(), 6);
        assert_eq!(adjacent(Location::new(0, 0), None).count(), 6);
    }

    #[test]
    fn test_route_display() {
        let mut r = Route::default();
        r.steps = vec![Location::new(0, 0), Location::new(1, 0)];
        r.waypoints.insert(Location::new(1, 0), Waypoint::new(1));
        assert_eq!(r.to_string(), "(0,0) -> (1,0)[1] [move_left 0]");
    }

    #[test]
    fn test_ordered_waypoints() {
        let mut r = Route::default();
        r.steps = vec![Location::new(0, 0), Location::new(0, 1), Location::new(0, 2)];
        r.waypoints.insert(Location::new(0, 2), Waypoint::new(2));
        r.waypoints.insert(Location::new(0, 1), Waypoint::new(1));
        let turns = r.ordered_waypoints().map(|(_, w)| w.turns).collect::<Vec<_>>();
        assert_eq!(turns, vec![1, 2]);
    }
}
