//! Every location a unit can reach, and the best route to each of them.

use std::cmp::Ordering;
use std::collections::{ BinaryHeap, HashMap, HashSet };

use crate::cost::{ Allowance, CostOptions, ShortestPath };
use crate::grid::Location;
use crate::search::{ adjacent, movement_points, CostCalculator, Route, Waypoint };
use crate::world::{ self, Game, Map, Team, Unit };

/// Options of a reachability search.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct ReachOptions {
    /// Ignore enemy zones of control, even if the unit is no skirmisher.
    pub force_ignore_zoc: bool,
    /// Let a unit that can teleport do so between its team's villages.
    pub allow_teleport: bool,
    /// The number of turns to look ahead beyond the current one.
    pub additional_turns: u32,
    /// Consider all units visible, regardless of fog and invisibility.
    pub see_all: bool,
    /// Ignore other units altogether.
    pub ignore_units: bool,
}

/// The locations a unit can reach, with the best route to each.
#[derive(Clone, Debug, Default)]
pub struct Paths {
    pub routes: HashMap<Location, Route>,
}

/// How a location was reached: the earlier turn, then the lower cost,
/// then the fewer steps, the better.
#[derive(Clone, Copy, Debug)]
struct Reached {
    turn: u32,
    cost: f64,
    steps: u32,
}

impl Reached {
    fn rank(&self, other: &Reached) -> Ordering {
        self.turn.cmp(&other.turn)
            .then_with(|| self.cost.total_cmp(&other.cost))
            .then_with(|| self.steps.cmp(&other.steps))
    }
}

/// A node on the frontier of the search.
struct Frontier {
    loc: Location,
    reached: Reached,
    seq: u64,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Frontier) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Frontier) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Frontier) -> Ordering {
        // Better ranks are "greater" for the binary heap.
        other.reached.rank(&self.reached)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl Paths {
    /// The routes of `unit` from its location, as seen by `viewing_team`,
    /// under the rules of the [`ShortestPath`] calculator.
    pub fn new<G: Game>(
        game: &G,
        unit: &G::Unit,
        viewing_team: &G::Team,
        options: ReachOptions
    ) -> Paths {
        let calc = ShortestPath::new(game, unit, viewing_team).with_options(CostOptions {
            ignore_units: options.ignore_units,
            ignore_zoc: options.force_ignore_zoc,
            ignore_defense: false,
            see_all: options.see_all,
        });
        let teleports = if options.allow_teleport && unit.can_teleport() {
            Some(teleport_locations(game, unit, viewing_team, options))
        } else {
            None
        };
        Paths::search(unit.location(), &calc, unit.total_movement(),
                      options.additional_turns, teleports.as_ref())
    }

    /// Search the routes from `origin` to every location that can be
    /// reached within the current turn and `additional_turns` more.
    ///
    /// The calculator's [`max_cost`] is the movement left in the current
    /// turn, `total_movement` that of every following turn. Every step is
    /// priced with the cost spent so far over all turns, so that a
    /// calculator can let a unit lose the rest of a turn, e.g. when it
    /// enters an enemy zone of control. A location is settled with the
    /// first route to it taken from the frontier, which is the one that
    /// arrives in the earliest turn, at the lowest cost, in the fewest
    /// steps. Every location at which a route passes into the next turn
    /// gets a [`Waypoint`].
    ///
    /// [`max_cost`]: ../search/trait.CostCalculator.html#method.max_cost
    pub fn search(
        origin: Location,
        calc: &impl CostCalculator,
        total_movement: u32,
        additional_turns: u32,
        teleports: Option<&HashSet<Location>>
    ) -> Paths {
        debug_assert!(additional_turns == 0 || total_movement > 0,
            "look-ahead for a unit without movement");
        let allowance = Allowance { left: calc.max_cost(), total: total_movement };
        let horizon = allowance.left.saturating_add(additional_turns.saturating_mul(total_movement));

        let start = Reached { turn: 0, cost: 0., steps: 0 };
        let mut best: HashMap<Location, (Reached, Option<Location>)> = HashMap::new();
        let mut settled = HashSet::new();
        let mut open = BinaryHeap::new();
        let mut seq = 0;
        best.insert(origin, (start, None));
        open.push(Frontier { loc: origin, reached: start, seq });

        while let Some(current) = open.pop() {
            if !settled.insert(current.loc) {
                continue
            }
            let here = current.reached;
            for next in adjacent(current.loc, teleports) {
                if settled.contains(&next) {
                    continue
                }
                let cost = match calc.cost(current.loc, next, here.cost) {
                    Some(step) => here.cost + step,
                    None       => continue
                };
                let spent = movement_points(cost);
                if spent > horizon {
                    continue
                }
                let reached = Reached { turn: allowance.turn(spent), cost, steps: here.steps + 1 };
                let better = best.get(&next).map_or(true, |(r, _)|
                    reached.rank(r) == Ordering::Less);
                if better {
                    best.insert(next, (reached, Some(current.loc)));
                    seq += 1;
                    open.push(Frontier { loc: next, reached, seq });
                }
            }
        }

        let routes = settled.iter().map(|dst| {
            (*dst, route_to(*dst, &best, allowance))
        }).collect::<HashMap<_, _>>();
        debug!("paths: {} locations reachable from {} within {} turn(s)",
               routes.len(), origin, additional_turns + 1);
        Paths { routes }
    }

    pub fn route(&self, dst: Location) -> Option<&Route> {
        self.routes.get(&dst)
    }

    pub fn contains(&self, dst: Location) -> bool {
        self.routes.contains_key(&dst)
    }

    /// The reachable locations, in no particular order.
    pub fn destinations(&self) -> impl Iterator<Item=Location> + '_ {
        self.routes.keys().copied()
    }
}

/// Trace the route to `dst` back to the origin, marking every location
/// where a turn ends on the way.
fn route_to(
    dst: Location,
    best: &HashMap<Location, (Reached, Option<Location>)>,
    allowance: Allowance
) -> Route {
    let mut trail = Vec::new();
    let mut current = Some(dst);
    while let Some(loc) = current {
        let (reached, parent) = best[&loc];
        trail.push((loc, reached));
        current = parent;
    }
    trail.reverse();
    let mut waypoints = HashMap::new();
    for w in trail.windows(2) {
        let ((loc, here), (_, next)) = (w[0], w[1]);
        if next.turn > here.turn {
            waypoints.insert(loc, Waypoint::new(here.turn + 1));
        }
    }
    let (_, last) = trail[trail.len() - 1];
    Route {
        steps: trail.into_iter().map(|(l, _)| l).collect(),
        move_left: allowance.remaining(movement_points(last.cost)),
        waypoints,
    }
}

/// The locations between which `unit` may teleport: the villages of
/// its team that are not held by another unit visible to `viewing_team`.
pub fn teleport_locations<G: Game>(
    game: &G,
    unit: &G::Unit,
    viewing_team: &G::Team,
    options: ReachOptions
) -> HashSet<Location> {
    let team = game.team(unit.side());
    game.map().villages().into_iter()
        .filter(|v| team.owns_village(*v))
        .filter(|v| options.ignore_units || *v == unit.location() ||
            world::visible_unit_at(game, *v, viewing_team, options.see_all).is_none())
        .collect()
}
