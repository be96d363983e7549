use std::cmp::Ordering;
use std::collections::{ BinaryHeap, HashMap, HashSet };

use crate::grid::Location;

use super::{ adjacent, movement_points, CostCalculator, Route, Window };

/// A node in the "open" list of the A* algorithm to prioritise the search.
struct Open {
    loc: Location,
    /// The estimated total cost.
    priority: f64,
    /// Insertion order, to break ties between equal priorities.
    seq: u64,
}

impl PartialEq for Open {
    fn eq(&self, other: &Open) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Open {}

impl PartialOrd for Open {
    fn partial_cmp(&self, other: &Open) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Open {
    fn cmp(&self, other: &Open) -> Ordering {
        // Lower priorities (= estimated total costs) and, among those,
        // earlier insertions are considered "greater" for the binary heap.
        other.priority.total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Search for the cheapest route from `src` to `dst`, as priced by the
/// given cost calculator.
///
/// Steps whose accumulated cost exceeds `stop_at` (in movement points)
/// are not explored, nor are locations outside of `window`. Locations
/// in `teleports` are adjacent to each other.
///
/// An empty route is returned if there is no route within these bounds.
pub fn a_star_search(
    src: Location,
    dst: Location,
    stop_at: f64,
    calc: &impl CostCalculator,
    window: Window,
    teleports: Option<&HashSet<Location>>
) -> Route {
    debug_assert!(stop_at >= 0.);
    if !window.contains(src) || !window.contains(dst) {
        debug!("a_star_search: {} -> {} outside of {:?}", src, dst, window);
        return Route::default()
    }
    if src == dst {
        return Route {
            steps: vec![src],
            move_left: calc.max_cost(),
            waypoints: HashMap::new(),
        }
    }
    // A destination that cannot be entered at all is not worth a search.
    if calc.cost(src, dst, 0.).is_none() {
        trace!("a_star_search: {} is impassable", dst);
        return Route::default()
    }
    let heuristic = |l: Location| estimate(calc, l, dst, teleports);
    let mut parents = HashMap::new();
    let mut costs   = HashMap::new();
    let mut closed  = HashSet::new();
    let mut open    = BinaryHeap::new();
    let mut seq     = 0;
    open.push(Open { loc: src, priority: heuristic(src), seq });
    costs.insert(src, 0.);
    while let Some(parent) = open.pop() {
        let pc = parent.loc;
        if pc == dst {
            break
        }
        if !closed.insert(pc) {
            continue
        }
        let cost_so_far = costs[&pc];
        for child in adjacent(pc, teleports) {
            if !window.contains(child) || closed.contains(&child) {
                continue
            }
            let new_cost = match calc.cost(pc, child, cost_so_far) {
                Some(cost) => cost_so_far + cost,
                None       => continue
            };
            if movement_points(new_cost) as f64 > stop_at {
                continue
            }
            if costs.get(&child).map_or(true, |old| new_cost < *old) {
                parents.insert(child, pc);
                costs.insert(child, new_cost);
                seq += 1;
                open.push(Open { loc: child, priority: new_cost + heuristic(child), seq });
            }
        }
    }
    let total = match costs.get(&dst) {
        Some(c) => *c,
        None    => {
            debug!("a_star_search: no route {} -> {}", src, dst);
            return Route::default()
        }
    };
    let mut steps = vec![dst];
    let mut current = dst;
    while current != src {
        current = parents[&current];
        steps.push(current);
    }
    steps.reverse();
    trace!("a_star_search: {} -> {} in {} steps, cost {}", src, dst, steps.len(), total);
    Route {
        steps,
        move_left: calc.max_cost().saturating_sub(movement_points(total)),
        waypoints: HashMap::new(),
    }
}

/// The heuristic of the calculator, relaxed for teleports: a route may
/// walk to the nearest teleport location and reappear at the one
/// nearest to the destination.
fn estimate(
    calc: &impl CostCalculator,
    from: Location,
    to: Location,
    teleports: Option<&HashSet<Location>>
) -> f64 {
    let direct = calc.heuristic(from, to);
    let nearest = |l: Location| teleports.and_then(|ts|
        ts.iter().map(|t| calc.heuristic(l, *t)).min_by(|a, b| a.total_cmp(b)));
    match (nearest(from), nearest(to)) {
        (Some(a), Some(b)) => direct.min(a + b),
        _                  => direct,
    }
}
