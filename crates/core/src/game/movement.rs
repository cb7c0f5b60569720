//! Blocking scans and atomic movement within and between areas.
//! This module exists so movement rules are shared by actions, tasks, and
//! creature behavior. It does not own door entry or combat flow.

use rand_chacha::rand_core::Rng;

use super::*;

fn blocks(mover: &ObjectBody, candidate: &GameObject) -> bool {
    match (mover, &candidate.body) {
        (ObjectBody::Aftik(_), ObjectBody::Creature(creature)) => creature.entity.is_alive(),
        (ObjectBody::Creature(_), ObjectBody::Aftik(aftik)) => aftik.entity.is_alive(),
        _ => false,
    }
}

impl Game {
    /// Nearest object to `from` that blocks `mover` within the inclusive
    /// `[min(from, to), max(from, to)]` range. Equidistant candidates are
    /// broken by an RNG draw so neither side is favored.
    pub(super) fn find_blocking(
        &mut self,
        mover: ObjectId,
        from: Coord,
        to: Coord,
    ) -> Option<ObjectId> {
        let area = self.state.object(mover).pos.area;
        let (lo, hi) = (from.min(to), from.max(to));
        let mover_body = &self.state.object(mover).body;

        let mut nearest: Vec<ObjectId> = Vec::new();
        let mut best = Coord::MAX;
        for object in self.state.objects_in(area) {
            if object.id == mover || !blocks(mover_body, object) {
                continue;
            }
            if object.pos.coord < lo || object.pos.coord > hi {
                continue;
            }
            let distance = (object.pos.coord - from).abs();
            if distance < best {
                best = distance;
                nearest.clear();
                nearest.push(object.id);
            } else if distance == best {
                nearest.push(object.id);
            }
        }

        match nearest.len() {
            0 => None,
            1 => Some(nearest[0]),
            count => Some(nearest[self.rng.next_u64() as usize % count]),
        }
    }

    /// Atomic move: either the mover ends at `target`, or nothing changes and
    /// the nearest blocker is returned.
    pub fn try_move_to(&mut self, mover: ObjectId, target: Coord) -> Result<(), MoveBlocked> {
        let pos = self.state.object(mover).pos;
        let destination = self.state.position(pos.area, target);
        if destination.coord == pos.coord {
            return Ok(());
        }
        if let Some(blocker) = self.find_blocking(mover, pos.coord, destination.coord) {
            return Err(MoveBlocked { blocker });
        }
        self.state.object_mut(mover).pos = destination;
        Ok(())
    }

    pub(super) fn try_move_next_to(
        &mut self,
        mover: ObjectId,
        target: ObjectId,
    ) -> Result<(), MoveBlocked> {
        let mover_pos = self.state.object(mover).pos;
        let target_pos = self.state.object(target).pos;
        assert_eq!(mover_pos.area, target_pos.area, "move-next-to across areas");
        if mover_pos.is_adjacent_to(target_pos) {
            return Ok(());
        }
        let beside = target_pos.towards(mover_pos.coord).coord;
        self.try_move_to(mover, beside)
    }
}
