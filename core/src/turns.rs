//! Annotating a route with the turns it takes.

use crate::search::{ Route, Waypoint };
use crate::world::{ self, Game, Map, Team, Unit };

/// Walk `route` with the movement of `unit` and record a [`Waypoint`]
/// wherever the unit has to stop: at the end of every turn and at the
/// destination. Returns the number of turns the route takes, or `None`
/// if some step on the route is too expensive for the unit to ever pay
/// for. An empty route takes no turns.
///
/// Any waypoints the route had before are replaced, so annotating a
/// route twice gives the same result.
pub fn route_turns_to_complete<G: Game>(
    unit: &G::Unit,
    route: &mut Route,
    viewing_team: &G::Team,
    game: &G
) -> Option<u32> {
    route.waypoints.clear();
    if route.steps.is_empty() {
        return Some(0)
    }
    let map = game.map();
    let unit_team = game.team(unit.side());
    let total = unit.total_movement();
    let last = route.steps.len() - 1;

    let mut turns = 0;
    let mut movement = unit.movement_left();
    let mut zoc = false;
    for (i, loc) in route.steps.iter().copied().enumerate() {
        let move_cost = if i == last { 0 } else { unit.movement_cost(map.terrain(route.steps[i + 1])) };
        if i == last || zoc || move_cost > movement {
            let capture = map.is_village(loc) && (!unit_team.owns_village(loc) ||
                (viewing_team.is_enemy(unit.side()) && viewing_team.fogged(loc)));
            // Hidden from the observer by fog, shroud or its own invisibility.
            let invisible = viewing_team.shrouded(loc) || viewing_team.fogged(loc) ||
                (unit.is_invisible(loc) && viewing_team.is_enemy(unit.side()));
            turns += 1;
            route.waypoints.insert(loc, Waypoint { turns, zoc, capture, invisible });
            if i == last {
                break
            }
            movement = total;
            if move_cost > movement {
                debug!("route_turns_to_complete: step to {} costs {} of {}",
                       route.steps[i + 1], move_cost, total);
                return None
            }
        }
        let next = route.steps[i + 1];
        zoc = world::enemy_zoc(game, next, viewing_team, unit.side(), false)
            && !unit.is_skirmisher(next);
        movement = if zoc { 0 } else { movement - move_cost };
    }
    trace!("route_turns_to_complete: {}", route);
    Some(turns)
}
