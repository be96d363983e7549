//! The cost calculators used for unit movement.
//!
//! [`ShortestPath`] prices steps by the full rules of movement. When it
//! finds no route, e.g. because the way is temporarily blocked, the
//! [`Emergency`] calculator only looks at terrain, and the [`Dummy`]
//! calculator, as a last resort, at nothing but the board itself.
//! [`Calculator`] is the closed set of these, and [`route_with_fallback`]
//! walks the chain.

use crate::grid::Location;
use crate::search::{ CostCalculator, Route, Window, movement_points };
use crate::search::astar::a_star_search;
use crate::world::{ self, Game, Map, Team, Unit };

/// The threshold used by searches that are only bounded by the map.
const UNBOUNDED: f64 = 10000.;

/// Subcosts are scaled down so that they never outweigh a movement
/// point on routes shorter than about a hundred steps.
const SUBCOST_SCALE: f64 = 10000.;

/// The movement allowance of a unit.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Allowance {
    /// Movement points left in the current turn.
    pub left: u32,
    /// Movement points at the start of every following turn.
    pub total: u32,
}

impl Allowance {
    pub fn of(unit: &impl Unit) -> Allowance {
        Allowance { left: unit.movement_left(), total: unit.total_movement() }
    }

    /// The turn (0 being the current one) in which a unit has spent
    /// `spent` movement points in total.
    pub fn turn(&self, spent: u32) -> u32 {
        if spent <= self.left {
            0
        } else {
            1 + (spent - self.left - 1) / self.total.max(1)
        }
    }

    /// The movement points left in the turn in which a unit has spent
    /// `spent` movement points in total.
    pub fn remaining(&self, spent: u32) -> u32 {
        if spent <= self.left {
            self.left - spent
        } else if self.total == 0 {
            0
        } else {
            match (spent - self.left) % self.total {
                0 => 0,
                over => self.total - over,
            }
        }
    }
}

/// Options of the [`ShortestPath`] calculator.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct CostOptions {
    /// Ignore other units, i.e. occupancy and zones of control.
    pub ignore_units: bool,
    /// Ignore enemy zones of control.
    pub ignore_zoc: bool,
    /// Do not prefer terrain with better defense.
    pub ignore_defense: bool,
    /// Consider all units visible, regardless of fog and invisibility.
    pub see_all: bool,
}

/// Prices steps by terrain, occupancy and zones of control, as seen by
/// a viewing team, over as many turns as it takes.
///
/// Entering a location costs its terrain cost for the unit. If a unit
/// cannot pay for a step with what it has left in a turn, the rest of
/// the turn is lost. Entering an enemy zone of control costs all the
/// movement left in the turn. Shrouded locations, locations with a
/// visible enemy or a hard to pass unit, and terrain the unit could
/// never enter are impassable.
pub struct ShortestPath<'a, G: Game> {
    game: &'a G,
    unit: &'a G::Unit,
    viewing_team: &'a G::Team,
    allowance: Allowance,
    options: CostOptions,
}

impl<'a, G: Game> ShortestPath<'a, G> {
    pub fn new(game: &'a G, unit: &'a G::Unit, viewing_team: &'a G::Team) -> Self {
        ShortestPath {
            game,
            unit,
            viewing_team,
            allowance: Allowance::of(unit),
            options: CostOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CostOptions) -> Self {
        self.options = options;
        self
    }

    pub fn allowance(&self) -> Allowance {
        self.allowance
    }

    pub fn options(&self) -> CostOptions {
        self.options
    }
}

impl<'a, G: Game> CostCalculator for ShortestPath<'a, G> {
    fn cost(&self, _from: Location, to: Location, so_far: f64) -> Option<f64> {
        let map = self.game.map();
        if !map.on_board(to) || self.viewing_team.shrouded(to) {
            return None
        }
        let terrain = map.terrain(to);
        let terrain_cost = self.unit.movement_cost(terrain);
        debug_assert!(terrain_cost >= 1, "terrain cost below 1 at {}", to);
        if terrain_cost > self.allowance.total {
            return None
        }

        let mut occupied_subcost = 0;
        if !self.options.ignore_units && to != self.unit.location() {
            let see_all = self.options.see_all;
            if let Some(other) = world::visible_unit_at(self.game, to, self.viewing_team, see_all) {
                let own_team = self.game.team(self.unit.side());
                if own_team.is_enemy(other.side()) || other.is_hard_to_pass() {
                    return None
                }
                // Prefer empty locations, friends may still move.
                occupied_subcost = 1;
            }
        }

        let mut remaining = self.allowance.remaining(movement_points(so_far));
        let mut move_cost = 0;
        if remaining < terrain_cost {
            move_cost += remaining;
            remaining = self.allowance.total;
        }
        let zoc = !self.options.ignore_units
            && !self.options.ignore_zoc
            && remaining != terrain_cost
            && !self.unit.is_skirmisher(to)
            && world::enemy_zoc(self.game, to, self.viewing_team, self.unit.side(),
                                self.options.see_all);
        move_cost += if zoc { remaining } else { terrain_cost };

        let defense_subcost = if self.options.ignore_defense {
            0
        } else {
            self.unit.defense_modifier(terrain)
        };
        Some(move_cost as f64 + (defense_subcost + occupied_subcost) as f64 / SUBCOST_SCALE)
    }

    fn max_cost(&self) -> u32 {
        self.allowance.left
    }
}

/// Prices steps by terrain alone, ignoring units, shroud and fog.
pub struct Emergency<'a, U, M> {
    unit: &'a U,
    map: &'a M,
}

impl<'a, U: Unit, M: Map> Emergency<'a, U, M> {
    pub fn new(unit: &'a U, map: &'a M) -> Self {
        Emergency { unit, map }
    }
}

impl<'a, U: Unit, M: Map> CostCalculator for Emergency<'a, U, M> {
    fn cost(&self, _from: Location, to: Location, _so_far: f64) -> Option<f64> {
        if !self.map.on_board(to) {
            return None
        }
        Some(self.unit.movement_cost(self.map.terrain(to)) as f64)
    }

    fn max_cost(&self) -> u32 {
        self.unit.movement_left()
    }
}

/// Prices every step on the board at `1`.
pub struct Dummy<'a, M> {
    map: &'a M,
    movement_left: u32,
}

impl<'a, M: Map> Dummy<'a, M> {
    pub fn new(unit: &impl Unit, map: &'a M) -> Self {
        Dummy { map, movement_left: unit.movement_left() }
    }
}

impl<'a, M: Map> CostCalculator for Dummy<'a, M> {
    fn cost(&self, _from: Location, to: Location, _so_far: f64) -> Option<f64> {
        if self.map.on_board(to) { Some(1.) } else { None }
    }

    fn max_cost(&self) -> u32 {
        self.movement_left
    }
}

/// The cost calculators for unit movement.
pub enum Calculator<'a, G: Game> {
    ShortestPath(ShortestPath<'a, G>),
    Emergency(Emergency<'a, G::Unit, G::Map>),
    Dummy(Dummy<'a, G::Map>),
}

impl<'a, G: Game> Calculator<'a, G> {
    /// The next, less demanding calculator to try when this one finds
    /// no route.
    pub fn fallback(&self) -> Option<Calculator<'a, G>> {
        match self {
            Calculator::ShortestPath(c) =>
                Some(Calculator::Emergency(Emergency::new(c.unit, c.game.map()))),
            Calculator::Emergency(c) =>
                Some(Calculator::Dummy(Dummy::new(c.unit, c.map))),
            Calculator::Dummy(_) =>
                None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Calculator::ShortestPath(_) => "shortest path",
            Calculator::Emergency(_)    => "emergency",
            Calculator::Dummy(_)        => "dummy",
        }
    }
}

impl<'a, G: Game> CostCalculator for Calculator<'a, G> {
    fn cost(&self, from: Location, to: Location, so_far: f64) -> Option<f64> {
        match self {
            Calculator::ShortestPath(c) => c.cost(from, to, so_far),
            Calculator::Emergency(c)    => c.cost(from, to, so_far),
            Calculator::Dummy(c)        => c.cost(from, to, so_far),
        }
    }

    fn max_cost(&self) -> u32 {
        match self {
            Calculator::ShortestPath(c) => c.max_cost(),
            Calculator::Emergency(c)    => c.max_cost(),
            Calculator::Dummy(c)        => c.max_cost(),
        }
    }
}

/// Find a route for `unit` to `dst` across the whole map, falling back
/// to ever less demanding calculators until one finds a route.
///
/// The result is empty only if not even the [`Dummy`] calculator finds
/// a route, i.e. if `dst` is off the board.
pub fn route_with_fallback<G: Game>(
    game: &G,
    unit: &G::Unit,
    viewing_team: &G::Team,
    dst: Location
) -> Route {
    let map = game.map();
    let window = Window::new(map.width(), map.height());
    let src = unit.location();
    let mut calc = Some(Calculator::ShortestPath(ShortestPath::new(game, unit, viewing_team)));
    while let Some(c) = calc {
        let route = a_star_search(src, dst, UNBOUNDED, &c, window, None);
        if !route.is_empty() {
            return route
        }
        debug!("route_with_fallback: no {} route {} -> {}", c.name(), src, dst);
        calc = c.fallback();
    }
    Route::default()
}
