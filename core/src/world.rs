//! The game state consumed by the searches.
//!
//! Maps, units and teams are owned elsewhere. The searches only read
//! them, through the narrow traits of this module, and never outlive
//! the borrowed snapshot.

use crate::grid::{ self, Location };

/// A side (player) in the game, numbered from 1.
pub type Side = u32;

/// The movement cost conventionally reported for impassable terrain.
/// Any cost exceeding a unit's total movement makes terrain impassable
/// for that unit.
pub const UNREACHABLE: u32 = 99;

/// An opaque terrain code, interpreted by [`Unit::movement_cost`] and
/// [`Unit::defense_modifier`].
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Terrain(pub u32);

/// The terrain of a rectangular map, indexed by [`Location`].
pub trait Map {
    fn width(&self) -> i32;
    fn height(&self) -> i32;

    fn on_board(&self, loc: Location) -> bool {
        loc.x >= 0 && loc.y >= 0 && loc.x < self.width() && loc.y < self.height()
    }

    fn terrain(&self, loc: Location) -> Terrain;
    fn is_village(&self, loc: Location) -> bool;
    fn is_castle(&self, loc: Location) -> bool;

    /// All village locations on the map.
    fn villages(&self) -> Vec<Location>;
}

/// A unit on the map.
pub trait Unit {
    fn side(&self) -> Side;
    fn location(&self) -> Location;

    /// The movement points the unit has left in the current turn.
    fn movement_left(&self) -> u32;

    /// The movement points the unit gets at the start of each turn.
    fn total_movement(&self) -> u32;

    /// The movement points needed to enter terrain of the given type.
    /// Must be at least 1.
    fn movement_cost(&self, terrain: Terrain) -> u32;

    /// The chance to be hit on the given terrain, in percent.
    fn defense_modifier(&self, terrain: Terrain) -> u32;

    /// Whether the unit ignores enemy zones of control at `loc`.
    fn is_skirmisher(&self, _loc: Location) -> bool {
        false
    }

    fn emits_zoc(&self) -> bool {
        true
    }

    /// Whether other units, friends included, cannot move through the
    /// location held by this unit.
    fn is_hard_to_pass(&self) -> bool {
        false
    }

    /// Whether the unit is invisible to its enemies when standing at `loc`.
    fn is_invisible(&self, _loc: Location) -> bool {
        false
    }

    /// Whether the unit may teleport between the villages of its team.
    fn can_teleport(&self) -> bool {
        false
    }
}

/// A team, as far as alliances and knowledge of the map are concerned.
pub trait Team {
    fn is_enemy(&self, side: Side) -> bool;
    fn shrouded(&self, loc: Location) -> bool;
    fn fogged(&self, loc: Location) -> bool;
    fn owns_village(&self, loc: Location) -> bool;
}

/// A read-only snapshot of the game.
pub trait Game {
    type Map: Map;
    type Unit: Unit;
    type Team: Team;

    fn map(&self) -> &Self::Map;
    fn unit_at(&self, loc: Location) -> Option<&Self::Unit>;

    /// The team playing the given side.
    fn team(&self, side: Side) -> &Self::Team;
}

/// The unit at `loc`, if there is one that `viewing_team` can see.
///
/// A unit is hidden from the viewing team if its location is fogged,
/// or if it is invisible there and belongs to an enemy of the viewing
/// team. With `see_all`, every unit is visible.
pub fn visible_unit_at<'g, G: Game>(
    game: &'g G,
    loc: Location,
    viewing_team: &G::Team,
    see_all: bool
) -> Option<&'g G::Unit> {
    if !game.map().on_board(loc) {
        return None
    }
    if !see_all && viewing_team.fogged(loc) {
        return None
    }
    game.unit_at(loc).filter(|u|
        see_all || !(u.is_invisible(loc) && viewing_team.is_enemy(u.side())))
}

/// Whether `loc` lies in the zone of control of an enemy of `side`,
/// as far as `viewing_team` can tell.
pub fn enemy_zoc<G: Game>(
    game: &G,
    loc: Location,
    viewing_team: &G::Team,
    side: Side,
    see_all: bool
) -> bool {
    let current_team = game.team(side);
    grid::neighbours(loc).any(|adj|
        visible_unit_at(game, adj, viewing_team, see_all).map_or(false, |u|
            u.side() != side && current_team.is_enemy(u.side()) && u.emits_zoc()))
}
