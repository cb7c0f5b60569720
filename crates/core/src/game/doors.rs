//! Door entry checks and the shared door-pair property state machine.
//! Forcing resolves the obstruction completely: the pair property becomes
//! `Empty` and both sides observe it.

use super::*;

impl DoorProperty {
    /// Entry check against the items an aftik holds. A successful pass
    /// through a locked door reports the item that enabled it; the item is
    /// not consumed.
    pub fn check_entry(&self, held: &[ItemKind]) -> Result<Option<ItemKind>, DoorBlockedReason> {
        match *self {
            DoorProperty::Empty => Ok(None),
            DoorProperty::Stuck => Err(DoorBlockedReason::Stuck),
            DoorProperty::Sealed => Err(DoorBlockedReason::SealedShut),
            DoorProperty::Locked { pass_item } => {
                if held.contains(&pass_item) {
                    Ok(Some(pass_item))
                } else {
                    Err(DoorBlockedReason::Locked)
                }
            }
        }
    }

    /// Tool categories that can force this property open, in the order they
    /// are tested.
    pub fn usable_methods(&self) -> &'static [ForceMethod] {
        match self {
            DoorProperty::Empty => &[],
            DoorProperty::Stuck => &[ForceMethod::Pry, ForceMethod::Cut],
            DoorProperty::Sealed | DoorProperty::Locked { .. } => &[ForceMethod::Cut],
        }
    }

    pub fn try_force_with(&self, held: &[ItemKind]) -> ForceResult {
        let methods = self.usable_methods();
        if methods.is_empty() {
            return ForceResult::Failed(ForceFailure::NotStuck);
        }
        for &method in methods {
            let tool = held.iter().copied().find(|item| item.profile().force_method == Some(method));
            if let Some(tool) = tool {
                return ForceResult::Forced { method, tool };
            }
        }
        if methods.contains(&ForceMethod::Pry) {
            ForceResult::Failed(ForceFailure::NeedTool)
        } else {
            ForceResult::Failed(ForceFailure::NeedBreakTool)
        }
    }
}

impl Game {
    /// Walk to the door and pass through it. On success the aftik is
    /// transferred to the destination area and records the connection in its
    /// memory; when the controlled member enters, co-located crew are primed
    /// to follow next tick.
    pub fn enter_door(&mut self, entity: ObjectId, door_id: ObjectId) -> EnterResult {
        let door = *self.state.door(door_id);
        let door_pos = self.state.object(door_id).pos;
        let entity_pos = self.state.object(entity).pos;
        assert_eq!(entity_pos.area, door_pos.area, "entering a door from another area");

        if let Err(blocked) = self.try_move_to(entity, door_pos.coord) {
            self.report_private(entity, LogEvent::MoveBlockedBy { entity, blocker: blocked.blocker });
            return EnterResult::PathBlocked(blocked);
        }

        let held = self.state.aftik(entity).held_items();
        match self.state.door_property(door.pair).check_entry(&held) {
            Err(reason) => {
                let event = LogEvent::EntryBlocked { entity, door: door_id, reason };
                self.report_area(door_pos.area, event);
                EnterResult::DoorBlocked(reason)
            }
            Ok(used_item) => {
                let origin_area = door_pos.area;
                self.state.transfer(entity, door.destination);
                let mind = &mut self.state.aftik_mut(entity).mind;
                mind.memory.record(origin_area, door.pair);
                mind.memory.record(door.destination.area, door.pair);

                self.report_area(
                    origin_area,
                    LogEvent::LeftThrough { entity, door: door_id, used_item },
                );
                self.report_area(
                    door.destination.area,
                    LogEvent::ArrivedThrough { entity, door: door_id },
                );
                if entity == self.state.crew.controlled {
                    self.mark_followers(entity, origin_area, door_id);
                }
                EnterResult::Entered { destination: door.destination, used_item }
            }
        }
    }

    fn mark_followers(&mut self, leader: ObjectId, origin_area: AreaId, door: ObjectId) {
        let tick = self.tick;
        let members = self.state.crew.members.clone();
        for member in members {
            if member == leader || !self.state.is_alive(member) {
                continue;
            }
            if self.state.object(member).pos.area != origin_area {
                continue;
            }
            self.state.aftik_mut(member).mind.follow =
                Some(FollowPlan { door, observed_tick: tick });
        }
    }

    /// Walk to the door and try to break the obstruction with a held tool.
    /// Success clears the shared property for both sides of the pair.
    pub fn force_door(
        &mut self,
        entity: ObjectId,
        door_id: ObjectId,
    ) -> Result<ForceResult, MoveBlocked> {
        let door = *self.state.door(door_id);
        let door_pos = self.state.object(door_id).pos;
        let entity_pos = self.state.object(entity).pos;
        assert_eq!(entity_pos.area, door_pos.area, "forcing a door from another area");

        if let Err(blocked) = self.try_move_to(entity, door_pos.coord) {
            self.report_private(entity, LogEvent::MoveBlockedBy { entity, blocker: blocked.blocker });
            return Err(blocked);
        }

        let held = self.state.aftik(entity).held_items();
        let result = self.state.door_property(door.pair).try_force_with(&held);
        match result {
            ForceResult::Forced { method, tool } => {
                self.state.door_pairs[door.pair].property = DoorProperty::Empty;
                let far_door = self
                    .state
                    .door_pair(door.pair)
                    .doors
                    .iter()
                    .copied()
                    .find(|&side| side != door_id)
                    .expect("door pair has two sides");
                self.report_area(
                    door_pos.area,
                    LogEvent::DoorForced { entity, door: door_id, method, tool },
                );
                self.report_area(
                    door.destination.area,
                    LogEvent::DoorForced { entity, door: far_door, method, tool },
                );
            }
            ForceResult::Failed(failure) => {
                let event = LogEvent::ForceFailed { entity, door: door_id, failure };
                self.report_area(door_pos.area, event);
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    #[test]
    fn empty_door_entry_is_idempotent() {
        let (mut game, outpost) = outpost_with_door(DoorProperty::Empty);
        for _ in 0..3 {
            assert_eq!(game.state().door_property(outpost.pair), DoorProperty::Empty);
            let result = game.enter_door(outpost.leader, outpost.field_door);
            assert!(matches!(result, EnterResult::Entered { used_item: None, .. }));
            let back = game.enter_door(outpost.leader, outpost.cabin_door);
            assert!(matches!(back, EnterResult::Entered { .. }));
        }
    }

    #[test]
    fn entering_lands_at_the_far_side_door() {
        let (mut game, outpost) = outpost_with_door(DoorProperty::Empty);
        let result = game.enter_door(outpost.leader, outpost.field_door);
        let destination = game.state().object(outpost.cabin_door).pos;
        assert_eq!(result, EnterResult::Entered { destination, used_item: None });
        assert_eq!(game.state().object(outpost.leader).pos, destination);
        assert!(game.state().area(outpost.cabin).objects.contains(&outpost.leader));
        assert!(!game.state().area(outpost.field).objects.contains(&outpost.leader));
    }

    #[test]
    fn stuck_door_blocks_until_pried_open_from_either_side() {
        let (mut game, outpost) = outpost_with_door(DoorProperty::Stuck);
        assert_eq!(
            game.enter_door(outpost.leader, outpost.field_door),
            EnterResult::DoorBlocked(DoorBlockedReason::Stuck)
        );

        give_item(&mut game, outpost.leader, ItemKind::Crowbar);
        let forced = game.force_door(outpost.leader, outpost.field_door).expect("lane open");
        assert_eq!(
            forced,
            ForceResult::Forced { method: ForceMethod::Pry, tool: ItemKind::Crowbar }
        );
        assert_eq!(game.state().door_property(outpost.pair), DoorProperty::Empty);

        // The far side shares the cell: entry now succeeds without any item.
        game.state_mut().aftik_mut(outpost.leader).remove_item(ItemKind::Crowbar);
        assert!(matches!(
            game.enter_door(outpost.leader, outpost.field_door),
            EnterResult::Entered { used_item: None, .. }
        ));
        assert!(matches!(
            game.enter_door(outpost.leader, outpost.cabin_door),
            EnterResult::Entered { used_item: None, .. }
        ));
    }

    #[test]
    fn sealed_door_needs_a_cutting_tool() {
        let (mut game, outpost) = outpost_with_door(DoorProperty::Sealed);
        assert_eq!(
            game.enter_door(outpost.leader, outpost.field_door),
            EnterResult::DoorBlocked(DoorBlockedReason::SealedShut)
        );

        give_item(&mut game, outpost.leader, ItemKind::Crowbar);
        let pried = game.force_door(outpost.leader, outpost.field_door).expect("lane open");
        assert_eq!(pried, ForceResult::Failed(ForceFailure::NeedBreakTool));

        give_item(&mut game, outpost.leader, ItemKind::Blowtorch);
        let cut = game.force_door(outpost.leader, outpost.field_door).expect("lane open");
        assert_eq!(cut, ForceResult::Forced { method: ForceMethod::Cut, tool: ItemKind::Blowtorch });
    }

    #[test]
    fn locked_door_passes_silently_with_the_keycard_and_keeps_it() {
        let (mut game, outpost) =
            outpost_with_door(DoorProperty::Locked { pass_item: ItemKind::Keycard });
        assert_eq!(
            game.enter_door(outpost.leader, outpost.field_door),
            EnterResult::DoorBlocked(DoorBlockedReason::Locked)
        );

        give_item(&mut game, outpost.leader, ItemKind::Keycard);
        let result = game.enter_door(outpost.leader, outpost.field_door);
        assert!(matches!(result, EnterResult::Entered { used_item: Some(ItemKind::Keycard), .. }));
        assert!(game.state().aftik(outpost.leader).has_item(ItemKind::Keycard));
        // The pass item opens nothing permanently.
        assert_eq!(
            game.state().door_property(outpost.pair),
            DoorProperty::Locked { pass_item: ItemKind::Keycard }
        );
    }

    #[test]
    fn forcing_an_open_door_reports_not_stuck() {
        let (mut game, outpost) = outpost_with_door(DoorProperty::Empty);
        give_item(&mut game, outpost.leader, ItemKind::Blowtorch);
        let result = game.force_door(outpost.leader, outpost.field_door).expect("lane open");
        assert_eq!(result, ForceResult::Failed(ForceFailure::NotStuck));
    }

    #[test]
    fn stuck_door_without_tools_reports_that_any_tool_helps() {
        let (mut game, outpost) = outpost_with_door(DoorProperty::Stuck);
        let result = game.force_door(outpost.leader, outpost.field_door).expect("lane open");
        assert_eq!(result, ForceResult::Failed(ForceFailure::NeedTool));
    }

    #[test]
    fn blocked_walk_to_the_door_fails_before_the_property_check() {
        let (mut game, outpost) = outpost_with_door(DoorProperty::Stuck);
        let creature = game.spawn_creature(CreatureKind::Cragmaw, outpost.field, 3);
        let result = game.enter_door(outpost.leader, outpost.field_door);
        assert_eq!(result, EnterResult::PathBlocked(MoveBlocked { blocker: creature }));
        // No entry attempt was made, so nothing was narrated about the door.
        assert!(!game.log().iter().any(|entry| matches!(
            entry.event,
            LogEvent::EntryBlocked { .. }
        )));
    }

    #[test]
    fn forcing_a_door_changes_the_snapshot_hash() {
        let (mut game, outpost) = outpost_with_door(DoorProperty::Stuck);
        give_item(&mut game, outpost.leader, ItemKind::Crowbar);
        // Stand at the door first so the property is the only state the
        // force call can change.
        game.try_move_to(outpost.leader, 4).expect("walk to the door");

        let before = game.snapshot_hash();
        game.force_door(outpost.leader, outpost.field_door).expect("lane open");
        let after = game.snapshot_hash();
        assert_ne!(before, after, "the pair property must feed the canonical hash");
    }

    #[test]
    fn wielded_tools_count_as_held() {
        let (mut game, outpost) = outpost_with_door(DoorProperty::Stuck);
        give_item(&mut game, outpost.leader, ItemKind::Crowbar);
        game.wield(outpost.leader, ItemKind::Crowbar).expect("crowbar in inventory");
        let result = game.force_door(outpost.leader, outpost.field_door).expect("lane open");
        assert!(matches!(result, ForceResult::Forced { tool: ItemKind::Crowbar, .. }));
    }
}
