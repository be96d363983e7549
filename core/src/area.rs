//! Area queries around locations on the map.

use std::collections::{ BTreeSet, HashSet };

use crate::grid::{ self, Location };
use crate::world::{ Game, Map };

/// The number of rings around a location searched for a vacant tile.
const VACANCY_RINGS: usize = 50;

/// All locations within distance `radius` of `loc`, on the board or not.
pub fn get_tiles_radius(loc: Location, radius: u16) -> HashSet<Location> {
    grid::range(loc, radius).collect()
}

/// All locations within distance `radius` of any of `origins`, found by
/// flooding outward over the locations of the board that satisfy `pred`.
///
/// The origins themselves are always part of the result. A location
/// that fails `pred` is neither part of the result nor flooded through,
/// so the distance is measured along the board, not as the crow flies.
pub fn tiles_radius<M, F>(map: &M, origins: &[Location], radius: u16, pred: F) -> HashSet<Location>
where M: Map, F: Fn(Location) -> bool {
    let mut result = origins.iter().copied().collect::<HashSet<_>>();
    let mut fringe = origins.to_vec();
    for _ in 0 .. radius {
        let mut next = Vec::new();
        for loc in fringe {
            for n in grid::neighbours(loc) {
                if !result.contains(&n) && map.on_board(n) && pred(n) {
                    result.insert(n);
                    next.push(n);
                }
            }
        }
        if next.is_empty() {
            break
        }
        fringe = next;
    }
    result
}

/// The kind of location wanted by [`find_vacant_tile`].
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Vacancy {
    /// A castle location, connected to the start over castle locations.
    Castle,
    /// Any location on the board.
    Any,
}

/// The vacant location nearest to `loc`, i.e. one not occupied by any
/// unit, searching outward ring by ring. Among locations equally far
/// away, the smallest (by x, then y) is chosen.
///
/// Returns `None` if there is no vacant location close enough.
pub fn find_vacant_tile<G: Game>(game: &G, loc: Location, vacancy: Vacancy) -> Option<Location> {
    let map = game.map();
    if !map.on_board(loc) {
        return None
    }
    let admissible = |l: Location| map.on_board(l) &&
        (vacancy == Vacancy::Any || map.is_castle(l));
    let mut checked = BTreeSet::new();
    let mut pending = BTreeSet::new();
    checked.insert(loc);
    pending.insert(loc);
    for _ in 0 .. VACANCY_RINGS {
        if pending.is_empty() {
            break
        }
        if let Some(found) = pending.iter().copied()
            .find(|l| admissible(*l) && game.unit_at(*l).is_none())
        {
            return Some(found)
        }
        let ring = std::mem::take(&mut pending);
        for l in ring {
            for n in grid::neighbours(l) {
                if checked.insert(n) && admissible(n) {
                    pending.insert(n);
                }
            }
        }
    }
    debug!("find_vacant_tile: nothing vacant around {} ({:?})", loc, vacancy);
    None
}
