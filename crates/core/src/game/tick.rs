//! The per-tick loop: prepare phase, the controlled action, autonomous crew,
//! creatures, then end-of-tick crew bookkeeping and outcome checks.

use super::*;

impl Game {
    /// Run one tick driven by the controlled member's action. Invalid
    /// external input is rejected before any state changes.
    pub fn take_turn(&mut self, action: Action) -> Result<TickReport, GameError> {
        if self.outcome.is_some() {
            return Err(GameError::RunOver);
        }
        self.validate_action(action)?;

        self.tick += 1;
        self.prepare_phase();

        let acted = self.state.crew.controlled;
        self.perform_action(acted, action);

        let members = self.state.crew.members.clone();
        for member in members {
            if self.outcome.is_some() {
                break;
            }
            if member == acted || member == self.state.crew.controlled {
                continue;
            }
            if !self.state.is_alive(member) {
                continue;
            }
            self.act_autonomous(member);
        }

        if self.outcome.is_none() {
            let creatures: Vec<ObjectId> = self
                .state
                .objects
                .iter()
                .filter(|(_, object)| matches!(object.body, ObjectBody::Creature(_)))
                .map(|(id, _)| id)
                .collect();
            for creature in creatures {
                if !self.state.objects.contains_key(creature) || !self.state.is_alive(creature) {
                    continue;
                }
                self.act_creature(creature);
            }
        }

        self.end_phase();
        Ok(TickReport { tick: self.tick, outcome: self.outcome })
    }

    fn validate_action(&self, action: Action) -> Result<(), GameError> {
        let controlled = self.state.crew.controlled;
        let pos = self.state.objects.get(controlled).expect("crew has no controlled member").pos;

        match action {
            Action::Wait => Ok(()),
            Action::MoveTo(coord) => {
                let length = self.state.area(pos.area).length;
                if (0..length).contains(&coord) { Ok(()) } else { Err(GameError::OutOfBounds) }
            }
            Action::Attack(target) => match &self.object_in_area(target, pos.area)?.body {
                ObjectBody::Creature(_) => Ok(()),
                _ => Err(GameError::NotACreature),
            },
            Action::EnterDoor(door) | Action::ForceDoor(door) => {
                match &self.object_in_area(door, pos.area)?.body {
                    ObjectBody::Door(_) => Ok(()),
                    _ => Err(GameError::NotADoor),
                }
            }
            Action::TakeItem(item) => match &self.object_in_area(item, pos.area)?.body {
                ObjectBody::Item(_) => Ok(()),
                _ => Err(GameError::NotAnItem),
            },
            Action::Wield(kind) => {
                if self.state.aftik(controlled).has_item(kind) {
                    Ok(())
                } else {
                    Err(GameError::ItemNotHeld)
                }
            }
            Action::Launch => {
                let ship = self.state.ship.ok_or(GameError::NoShip)?;
                if pos.area == ship.area { Ok(()) } else { Err(GameError::OutOfArea) }
            }
            Action::Command { target, .. } | Action::SwitchControl(target) => {
                if !self.state.objects.contains_key(target) {
                    return Err(GameError::UnknownObject);
                }
                if self.state.crew.members.contains(&target) {
                    Ok(())
                } else {
                    Err(GameError::NotACrewMember)
                }
            }
        }
    }

    fn object_in_area(&self, id: ObjectId, area: AreaId) -> Result<&GameObject, GameError> {
        let object = self.state.objects.get(id).ok_or(GameError::UnknownObject)?;
        if object.pos.area != area {
            return Err(GameError::OutOfArea);
        }
        Ok(object)
    }

    fn perform_action(&mut self, actor: ObjectId, action: Action) {
        match action {
            Action::Wait => {}
            Action::MoveTo(coord) => {
                if let Err(blocked) = self.try_move_to(actor, coord) {
                    self.report_private(
                        actor,
                        LogEvent::MoveBlockedBy { entity: actor, blocker: blocked.blocker },
                    );
                }
            }
            Action::Attack(target) => {
                let _ = self.move_and_attack(actor, target);
            }
            Action::EnterDoor(door) => {
                let _ = self.enter_door(actor, door);
            }
            Action::ForceDoor(door) => {
                let _ = self.force_door(actor, door);
            }
            Action::TakeItem(item) => {
                let _ = self.take_item(actor, item);
            }
            Action::Wield(kind) => {
                self.wield(actor, kind).expect("wield was validated");
            }
            Action::Launch => {
                let _ = self.advance_launch(actor);
            }
            Action::Command { target, command } => {
                // Installing overwrites any previous directive.
                self.state.aftik_mut(target).mind.command = Some(command);
            }
            Action::SwitchControl(target) => {
                self.state.crew.controlled = target;
                self.report_private(target, LogEvent::ControlPassed { to: target });
            }
        }
    }

    /// Walk to a loose item and pick it up.
    pub fn take_item(&mut self, entity: ObjectId, item_id: ObjectId) -> Result<(), MoveBlocked> {
        let item_pos = self.state.object(item_id).pos;
        let kind = match &self.state.object(item_id).body {
            ObjectBody::Item(kind) => *kind,
            other => panic!("taking a non-item: {other:?}"),
        };
        let entity_pos = self.state.object(entity).pos;
        assert_eq!(entity_pos.area, item_pos.area, "taking an item from another area");

        match self.try_move_to(entity, item_pos.coord) {
            Err(blocked) => {
                self.report_private(
                    entity,
                    LogEvent::MoveBlockedBy { entity, blocker: blocked.blocker },
                );
                Err(blocked)
            }
            Ok(()) => {
                self.state.remove_object(item_id);
                self.state.aftik_mut(entity).add_item(kind);
                self.report_area(item_pos.area, LogEvent::ItemTaken { entity, item: kind });
                Ok(())
            }
        }
    }

    /// Move an item from the inventory into the wielded slot; the previous
    /// weapon returns to the inventory.
    pub fn wield(&mut self, entity: ObjectId, kind: ItemKind) -> Result<(), GameError> {
        {
            let aftik = self.state.aftik_mut(entity);
            if aftik.wielded == Some(kind) {
                return Ok(());
            }
            let Some(index) = aftik.inventory.iter().position(|&held| held == kind) else {
                return Err(GameError::ItemNotHeld);
            };
            aftik.inventory.remove(index);
            if let Some(previous) = aftik.wielded.replace(kind) {
                aftik.inventory.push(previous);
            }
        }
        let area = self.state.object(entity).pos.area;
        self.report_area(area, LogEvent::Wielded { entity, item: kind });
        Ok(())
    }

    fn prepare_phase(&mut self) {
        let ids: Vec<ObjectId> = self.state.objects.iter().map(|(id, _)| id).collect();
        for id in ids {
            if let Some(data) = self.state.entity_data_mut(id)
                && data.is_alive()
            {
                data.stamina = (data.stamina + 1).min(data.stats.max_stamina());
            }
        }

        // Drop follow/force fragments that missed their window.
        let tick = self.tick;
        let members = self.state.crew.members.clone();
        for member in members {
            if !self.state.objects.contains_key(member) {
                continue;
            }
            let mind = &mut self.state.aftik_mut(member).mind;
            if mind.follow.is_some_and(|plan| plan.observed_tick + 1 < tick) {
                mind.follow = None;
            }
            if mind.pending_force.is_some_and(|plan| plan.scheduled_tick + 1 < tick) {
                mind.pending_force = None;
            }
        }

        // Snapshot each creature's live targets for this tick.
        let creatures: Vec<(ObjectId, AreaId)> = self
            .state
            .objects
            .iter()
            .filter(|(_, object)| matches!(object.body, ObjectBody::Creature(_)))
            .map(|(id, object)| (id, object.pos.area))
            .collect();
        for (id, area) in creatures {
            let targets: Vec<ObjectId> = self
                .state
                .objects_in(area)
                .filter(|object| {
                    matches!(&object.body, ObjectBody::Aftik(aftik) if aftik.entity.is_alive())
                })
                .map(|object| object.id)
                .collect();
            self.state.creature_mut(id).targets = targets;
        }
    }

    fn act_creature(&mut self, id: ObjectId) {
        let pos = self.state.object(id).pos;
        let is_moving = self.state.creature(id).kind.profile().is_moving;
        let cached = self.state.creature(id).targets.clone();

        let target = cached
            .into_iter()
            .filter(|&candidate| {
                self.state.is_alive(candidate)
                    && self.state.object(candidate).pos.area == pos.area
            })
            .min_by_key(|&candidate| {
                let target_pos = self.state.object(candidate).pos;
                (target_pos.distance_to(pos), target_pos.coord)
            });
        let Some(target) = target else {
            return;
        };

        if is_moving {
            let _ = self.move_and_attack(id, target);
        } else if self.state.object(target).pos.is_adjacent_to(pos) {
            self.attack(id, target);
        }
    }

    fn end_phase(&mut self) {
        let fallen: Vec<ObjectId> = self
            .state
            .crew
            .members
            .iter()
            .copied()
            .filter(|&member| !self.state.is_alive(member))
            .collect();
        for member in fallen {
            let name = self.state.aftik(member).name.clone();
            let area = self.state.object(member).pos.area;
            self.state.remove_object(member);
            self.state.crew.members.retain(|&held| held != member);
            self.report_area(area, LogEvent::CrewLost { name });
            if self.state.crew.controlled == member {
                // The roster can still hold members that fell this same tick;
                // control must land on a living one.
                let next = self
                    .state
                    .crew
                    .members
                    .iter()
                    .copied()
                    .find(|&held| self.state.is_alive(held));
                if let Some(next) = next {
                    self.state.crew.controlled = next;
                    self.report_private(next, LogEvent::ControlPassed { to: next });
                }
            }
        }

        if self.state.crew.members.is_empty() && self.outcome.is_none() {
            self.outcome = Some(RunOutcome::Defeat);
        }
    }
}
