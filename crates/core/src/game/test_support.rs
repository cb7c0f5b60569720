//! Shared fixtures for the `game` submodule test suites.
//! This module exists to avoid repeating level and crew setup across many
//! tests. It does not own production gameplay logic.

use super::*;

pub(super) struct Outpost {
    pub field: AreaId,
    pub cabin: AreaId,
    pub pair: DoorPairId,
    pub field_door: ObjectId,
    pub cabin_door: ObjectId,
    pub leader: ObjectId,
}

/// Two areas joined by one door pair; the controlled leader starts in the
/// field at coordinate 1, two steps short of the field-side door at 4.
pub(super) fn outpost_with_door(property: DoorProperty) -> (Game, Outpost) {
    let mut game = Game::new(12345);
    let field = game.new_area("field", 6);
    let cabin = game.new_area("cabin", 4);
    let pair =
        game.create_door_pair((field, 4, DoorKind::Door), (cabin, 0, DoorKind::Door), property);
    let [field_door, cabin_door] = game.state().door_pair(pair).doors;
    let leader = game.spawn_crew_member("Indigo", Stats::new(5, 4, 6), field, 1);
    (game, Outpost { field, cabin, pair, field_door, cabin_door, leader })
}

pub(super) fn give_item(game: &mut Game, aftik: ObjectId, kind: ItemKind) {
    game.state_mut().aftik_mut(aftik).add_item(kind);
}
