//! A small in-memory game used by the tests.

use std::collections::{ HashMap, HashSet };

use crate::grid::Location;
use crate::world::*;

pub const FLAT: Terrain      = Terrain(0);
pub const HILLS: Terrain     = Terrain(1);
pub const MOUNTAINS: Terrain = Terrain(2);
pub const WALL: Terrain      = Terrain(3);
pub const VILLAGE: Terrain   = Terrain(4);
pub const CASTLE: Terrain    = Terrain(5);

pub struct TestMap {
    width: i32,
    height: i32,
    terrain: HashMap<Location, Terrain>,
}

impl Map for TestMap {
    fn width(&self) -> i32 { self.width }
    fn height(&self) -> i32 { self.height }

    fn terrain(&self, loc: Location) -> Terrain {
        *self.terrain.get(&loc).unwrap_or(&FLAT)
    }

    fn is_village(&self, loc: Location) -> bool {
        self.terrain(loc) == VILLAGE
    }

    fn is_castle(&self, loc: Location) -> bool {
        self.terrain(loc) == CASTLE
    }

    fn villages(&self) -> Vec<Location> {
        let mut vs = self.terrain.iter()
            .filter(|(_, t)| **t == VILLAGE)
            .map(|(l, _)| *l)
            .collect::<Vec<_>>();
        vs.sort();
        vs
    }
}

#[derive(Clone, Debug)]
pub struct TestUnit {
    side: Side,
    loc: Location,
    movement_left: u32,
    total_movement: u32,
    skirmisher: bool,
    zoc: bool,
    hard_to_pass: bool,
    invisible: bool,
    teleport: bool,
}

impl TestUnit {
    pub fn new(side: Side, loc: Location) -> TestUnit {
        TestUnit {
            side,
            loc,
            movement_left: 5,
            total_movement: 5,
            skirmisher: false,
            zoc: true,
            hard_to_pass: false,
            invisible: false,
            teleport: false,
        }
    }

    pub fn with_movement(mut self, left: u32, total: u32) -> TestUnit {
        self.movement_left = left;
        self.total_movement = total;
        self
    }

    pub fn skirmisher(mut self) -> TestUnit { self.skirmisher = true; self }
    pub fn without_zoc(mut self) -> TestUnit { self.zoc = false; self }
    pub fn hard_to_pass(mut self) -> TestUnit { self.hard_to_pass = true; self }
    pub fn invisible(mut self) -> TestUnit { self.invisible = true; self }
    pub fn teleporter(mut self) -> TestUnit { self.teleport = true; self }
}

impl Unit for TestUnit {
    fn side(&self) -> Side { self.side }
    fn location(&self) -> Location { self.loc }
    fn movement_left(&self) -> u32 { self.movement_left }
    fn total_movement(&self) -> u32 { self.total_movement }

    fn movement_cost(&self, terrain: Terrain) -> u32 {
        match terrain {
            HILLS     => 2,
            MOUNTAINS => 3,
            WALL      => UNREACHABLE,
            _         => 1,
        }
    }

    fn defense_modifier(&self, terrain: Terrain) -> u32 {
        match terrain {
            HILLS     => 50,
            MOUNTAINS => 40,
            WALL      => 100,
            VILLAGE   => 40,
            CASTLE    => 40,
            _         => 60,
        }
    }

    fn is_skirmisher(&self, _loc: Location) -> bool { self.skirmisher }
    fn emits_zoc(&self) -> bool { self.zoc }
    fn is_hard_to_pass(&self) -> bool { self.hard_to_pass }
    fn is_invisible(&self, _loc: Location) -> bool { self.invisible }
    fn can_teleport(&self) -> bool { self.teleport }
}

pub struct TestTeam {
    side: Side,
    allies: HashSet<Side>,
    shroud: HashSet<Location>,
    fog: HashSet<Location>,
    villages: HashSet<Location>,
}

impl Team for TestTeam {
    fn is_enemy(&self, side: Side) -> bool {
        side != self.side && !self.allies.contains(&side)
    }

    fn shrouded(&self, loc: Location) -> bool {
        self.shroud.contains(&loc)
    }

    fn fogged(&self, loc: Location) -> bool {
        self.shroud.contains(&loc) || self.fog.contains(&loc)
    }

    fn owns_village(&self, loc: Location) -> bool {
        self.villages.contains(&loc)
    }
}

/// A game with three sides, all hostile to each other until allied.
pub struct TestGame {
    map: TestMap,
    units: HashMap<Location, TestUnit>,
    teams: Vec<TestTeam>,
}

impl TestGame {
    pub fn flat(width: i32, height: i32) -> TestGame {
        let teams = (1 ..= 3).map(|side| TestTeam {
            side,
            allies: HashSet::new(),
            shroud: HashSet::new(),
            fog: HashSet::new(),
            villages: HashSet::new(),
        }).collect();
        TestGame {
            map: TestMap { width, height, terrain: HashMap::new() },
            units: HashMap::new(),
            teams,
        }
    }

    pub fn set_terrain(&mut self, loc: Location, t: Terrain) {
        self.map.terrain.insert(loc, t);
    }

    pub fn add_unit(&mut self, u: TestUnit) {
        self.units.insert(u.loc, u);
    }

    pub fn unit(&self, loc: Location) -> &TestUnit {
        &self.units[&loc]
    }

    pub fn ally(&mut self, a: Side, b: Side) {
        self.teams[a as usize - 1].allies.insert(b);
        self.teams[b as usize - 1].allies.insert(a);
    }

    pub fn fog(&mut self, side: Side, loc: Location) {
        self.teams[side as usize - 1].fog.insert(loc);
    }

    pub fn shroud(&mut self, side: Side, loc: Location) {
        self.teams[side as usize - 1].shroud.insert(loc);
    }

    pub fn give_village(&mut self, side: Side, loc: Location) {
        self.set_terrain(loc, VILLAGE);
        self.teams[side as usize - 1].villages.insert(loc);
    }
}

impl Game for TestGame {
    type Map = TestMap;
    type Unit = TestUnit;
    type Team = TestTeam;

    fn map(&self) -> &TestMap {
        &self.map
    }

    fn unit_at(&self, loc: Location) -> Option<&TestUnit> {
        self.units.get(&loc)
    }

    fn team(&self, side: Side) -> &TestTeam {
        &self.teams[side as usize - 1]
    }
}
