//! Attack resolution: stat-driven power, dodge-stamina mitigation, death.
//! The classification math is kept in pure functions so it can be tested
//! without a running game.

use rand_chacha::rand_core::Rng;

use super::*;

pub(crate) const UNARMED_POWER: f32 = 2.0;
pub(crate) const STAMINA_HIT_COST: i32 = 3;

pub(crate) fn attack_power(stats: Stats, weapon_power: f32) -> f32 {
    (1.0 / 3.0 + stats.strength as f32 / 6.0) * weapon_power
}

pub(crate) fn wielded_power(aftik: &Aftik) -> f32 {
    aftik.wielded.and_then(|item| item.profile().weapon_damage).unwrap_or(UNARMED_POWER)
}

/// Dodge classification. `draw` is a uniform roll in `0..=20`; an exhausted
/// defender (stamina 0) can never dodge or graze.
pub(crate) fn dodge_outcome(
    attacker_agility: i32,
    defender_agility: i32,
    stamina: i32,
    max_stamina: i32,
    draw: i32,
) -> AttackOutcome {
    let fraction = if max_stamina > 0 { stamina as f32 / max_stamina as f32 } else { 0.0 };
    let rating = (2 * defender_agility - attacker_agility) as f32 * fraction - draw as f32;
    if rating > 5.0 {
        AttackOutcome::Dodge
    } else if rating > 0.0 {
        AttackOutcome::GrazingHit
    } else {
        AttackOutcome::DirectHit
    }
}

impl Game {
    /// Resolve one attack. The defender always pays the stamina cost of
    /// reacting, even on a clean dodge.
    pub fn attack(&mut self, attacker: ObjectId, target: ObjectId) -> AttackResult {
        let area = self.state.object(attacker).pos.area;
        assert_eq!(area, self.state.object(target).pos.area, "attack across areas");
        assert!(self.state.is_alive(target), "attacking a dead target");

        let (attacker_stats, weapon_power) = match &self.state.object(attacker).body {
            ObjectBody::Aftik(aftik) => (aftik.entity.stats, wielded_power(aftik)),
            ObjectBody::Creature(creature) => (creature.entity.stats, UNARMED_POWER),
            other => panic!("attacker is not an entity: {other:?}"),
        };
        let power = attack_power(attacker_stats, weapon_power);
        let draw = (self.rng.next_u32() % 21) as i32;

        let defender = self.state.entity_data(target).expect("target is not an entity");
        let outcome = dodge_outcome(
            attacker_stats.agility,
            defender.stats.agility,
            defender.stamina,
            defender.stats.max_stamina(),
            draw,
        );
        let damage = match outcome {
            AttackOutcome::Dodge => 0.0,
            AttackOutcome::GrazingHit => power / 2.0,
            AttackOutcome::DirectHit => power,
        };

        let defender = self.state.entity_data_mut(target).expect("target is not an entity");
        defender.stamina = (defender.stamina - STAMINA_HIT_COST).max(0);
        defender.health -= damage;
        let lethal = !defender.is_alive();

        self.report_area(area, LogEvent::AttackLanded { attacker, target, outcome });
        if lethal {
            self.on_death(target);
        }
        AttackResult { outcome, damage, lethal }
    }

    /// Close the distance and strike. A blocked approach returns the move
    /// failure and no attack happens; the two outcomes are exclusive.
    pub fn move_and_attack(
        &mut self,
        attacker: ObjectId,
        target: ObjectId,
    ) -> Result<AttackResult, MoveBlocked> {
        match self.try_move_next_to(attacker, target) {
            Err(blocked) => {
                self.report_private(
                    attacker,
                    LogEvent::MoveBlockedBy { entity: attacker, blocker: blocked.blocker },
                );
                Err(blocked)
            }
            Ok(()) => Ok(self.attack(attacker, target)),
        }
    }

    pub(super) fn on_death(&mut self, id: ObjectId) {
        let area = self.state.object(id).pos.area;
        self.report_area(area, LogEvent::Died { entity: id });
        // Creatures leave the world immediately. Fallen crew are collected by
        // the turn loop at end of tick so references stay valid mid-tick.
        if matches!(self.state.object(id).body, ObjectBody::Creature(_)) {
            self.state.remove_object(id);
        }
    }
}
