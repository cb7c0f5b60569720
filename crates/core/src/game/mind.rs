//! Autonomous crew behavior, evaluated once per tick per member: an
//! override command (when installed) suspends the fixed-priority task stack;
//! cancellation falls through to the tasks the same tick.

use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Task {
    Follow,
    ForceDoor,
    Wield,
    Fight,
}

const TASK_PRIORITY: [Task; 4] = [Task::Follow, Task::ForceDoor, Task::Wield, Task::Fight];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum CommandStatus {
    Keep,
    Remove,
}

impl Game {
    pub(super) fn act_autonomous(&mut self, id: ObjectId) {
        if let Some(command) = self.state.aftik(id).mind.command {
            if self.command_cancelled(id, command) {
                self.state.aftik_mut(id).mind.command = None;
                let area = self.state.object(id).pos.area;
                self.report_area(area, LogEvent::CommandCancelled { entity: id, command });
            } else {
                if let CommandStatus::Remove = self.perform_command(id, command) {
                    self.state.aftik_mut(id).mind.command = None;
                }
                return;
            }
        }
        self.run_task_stack(id);
    }

    /// The command's own precondition check; a true result removes it and
    /// hands the tick to the task stack.
    fn command_cancelled(&mut self, id: ObjectId, command: CommandKind) -> bool {
        let area = self.state.object(id).pos.area;
        match command {
            CommandKind::LaunchShip => {
                let Some(ship) = self.state.ship else {
                    return true;
                };
                if area == ship.area {
                    return ship.fuel_need > 0 && !self.state.aftik(id).has_item(ItemKind::FuelCan);
                }
                if self.find_door_towards(id, ship.area).is_none() {
                    self.report_area(area, LogEvent::RouteUnknown { entity: id, target: ship.area });
                    return true;
                }
                false
            }
            CommandKind::TakeItems | CommandKind::Rest => self.hostile_in_area(area),
        }
    }

    fn perform_command(&mut self, id: ObjectId, command: CommandKind) -> CommandStatus {
        match command {
            CommandKind::LaunchShip => self.launch_ship_step(id),
            CommandKind::TakeItems => self.take_items_step(id),
            CommandKind::Rest => {
                let data = self.state.entity_data(id).expect("resting aftik is an entity");
                if data.stamina >= data.stats.max_stamina() {
                    CommandStatus::Remove
                } else {
                    CommandStatus::Keep
                }
            }
        }
    }

    fn launch_ship_step(&mut self, id: ObjectId) -> CommandStatus {
        let ship = self.state.ship.expect("launch command without a ship");
        let area = self.state.object(id).pos.area;
        if area != ship.area {
            let Some(door) = self.find_door_towards(id, ship.area) else {
                return CommandStatus::Keep;
            };
            return match self.enter_door(id, door) {
                EnterResult::Entered { .. } => CommandStatus::Keep,
                EnterResult::DoorBlocked(_) | EnterResult::PathBlocked(_) => {
                    // The obstruction was narrated by enter_door; give up.
                    let here = self.state.object(id).pos.area;
                    self.report_area(
                        here,
                        LogEvent::CommandCancelled { entity: id, command: CommandKind::LaunchShip },
                    );
                    CommandStatus::Remove
                }
            };
        }
        self.advance_launch(id)
    }

    /// One launch step at the ship: install a carried fuel can, and lift off
    /// once the requirement is met. Shared by the Launch action and the
    /// LaunchShip command.
    pub(super) fn advance_launch(&mut self, id: ObjectId) -> CommandStatus {
        let ship = self.state.ship.expect("launch without a ship");
        let area = self.state.object(id).pos.area;
        assert_eq!(area, ship.area, "launch step away from the ship");

        if ship.fuel_need > 0 {
            if !self.state.aftik_mut(id).remove_item(ItemKind::FuelCan) {
                return CommandStatus::Keep;
            }
            let remaining = {
                let ship = self.state.ship.as_mut().expect("ship vanished mid-step");
                ship.fuel_need -= 1;
                ship.fuel_need
            };
            self.report_area(area, LogEvent::FuelInstalled { entity: id, remaining });
            if remaining > 0 {
                return CommandStatus::Keep;
            }
        }

        if let Some(ship) = self.state.ship.as_mut() {
            ship.launched = true;
        }
        self.outcome = Some(RunOutcome::Victory);
        self.report_area(area, LogEvent::ShipLaunched { area });
        CommandStatus::Remove
    }

    fn take_items_step(&mut self, id: ObjectId) -> CommandStatus {
        let Some(item) = self.nearest_loose_item(id) else {
            return CommandStatus::Remove;
        };
        match self.take_item(id, item) {
            Ok(()) => {
                if self.nearest_loose_item(id).is_some() {
                    CommandStatus::Keep
                } else {
                    CommandStatus::Remove
                }
            }
            Err(_) => {
                let area = self.state.object(id).pos.area;
                self.report_area(
                    area,
                    LogEvent::CommandCancelled { entity: id, command: CommandKind::TakeItems },
                );
                CommandStatus::Remove
            }
        }
    }

    fn nearest_loose_item(&self, id: ObjectId) -> Option<ObjectId> {
        let pos = self.state.object(id).pos;
        self.state
            .objects_in(pos.area)
            .filter(|object| matches!(object.body, ObjectBody::Item(_)))
            .min_by_key(|object| (object.pos.distance_to(pos), object.pos.coord))
            .map(|object| object.id)
    }

    fn run_task_stack(&mut self, id: ObjectId) {
        for task in TASK_PRIORITY {
            if self.task_applies(id, task) {
                self.perform_task(id, task);
                return;
            }
        }
    }

    fn task_applies(&self, id: ObjectId, task: Task) -> bool {
        let pos = self.state.object(id).pos;
        match task {
            Task::Follow => {
                let Some(plan) = self.state.aftik(id).mind.follow else {
                    return false;
                };
                plan.observed_tick < self.tick
                    && self.state.objects.contains_key(plan.door)
                    && self.state.object(plan.door).pos.area == pos.area
            }
            Task::ForceDoor => {
                let Some(plan) = self.state.aftik(id).mind.pending_force else {
                    return false;
                };
                plan.scheduled_tick < self.tick
                    && self.state.objects.contains_key(plan.door)
                    && self.state.object(plan.door).pos.area == pos.area
            }
            Task::Wield => self.wield_upgrade(id).is_some(),
            Task::Fight => self.nearest_live_creature(id).is_some(),
        }
    }

    fn perform_task(&mut self, id: ObjectId, task: Task) {
        match task {
            Task::Follow => {
                let plan = self.state.aftik_mut(id).mind.follow.take().expect("follow plan");
                if let EnterResult::DoorBlocked(_) = self.enter_door(id, plan.door) {
                    // A failed follow becomes a force attempt when a held
                    // tool can clear the obstruction.
                    let pair = self.state.door(plan.door).pair;
                    let held = self.state.aftik(id).held_items();
                    let attempt = self.state.door_property(pair).try_force_with(&held);
                    if matches!(attempt, ForceResult::Forced { .. }) {
                        self.state.aftik_mut(id).mind.pending_force =
                            Some(ForcePlan { door: plan.door, scheduled_tick: self.tick });
                    }
                }
            }
            Task::ForceDoor => {
                let plan =
                    self.state.aftik_mut(id).mind.pending_force.take().expect("force plan");
                let _ = self.force_door(id, plan.door);
            }
            Task::Wield => {
                let upgrade = self.wield_upgrade(id).expect("wield upgrade");
                self.wield(id, upgrade).expect("upgrade is in the inventory");
            }
            Task::Fight => {
                let target = self.nearest_live_creature(id).expect("live creature");
                let _ = self.move_and_attack(id, target);
            }
        }
    }

    fn wield_upgrade(&self, id: ObjectId) -> Option<ItemKind> {
        let aftik = self.state.aftik(id);
        let current = combat::wielded_power(aftik);
        aftik
            .inventory
            .iter()
            .copied()
            .filter_map(|item| item.profile().weapon_damage.map(|damage| (item, damage)))
            .filter(|&(_, damage)| damage > current)
            .max_by(|left, right| left.1.partial_cmp(&right.1).expect("weapon damage is finite"))
            .map(|(item, _)| item)
    }

    pub(super) fn nearest_live_creature(&self, id: ObjectId) -> Option<ObjectId> {
        let pos = self.state.object(id).pos;
        self.state
            .objects_in(pos.area)
            .filter(|object| {
                matches!(&object.body, ObjectBody::Creature(creature) if creature.entity.is_alive())
            })
            .min_by_key(|object| (object.pos.distance_to(pos), object.pos.coord))
            .map(|object| object.id)
    }

    pub(super) fn hostile_in_area(&self, area: AreaId) -> bool {
        self.state.objects_in(area).any(|object| {
            matches!(&object.body, ObjectBody::Creature(creature) if creature.entity.is_alive())
        })
    }
}
