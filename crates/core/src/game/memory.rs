//! Route search over personally-discovered door connections.
//! This module exists so tasks can ask "which door gets me toward area X"
//! without ever consulting the full level graph.

use std::collections::VecDeque;

use super::*;

impl Game {
    /// Next door to use from the aftik's current area toward `target`, using
    /// only connections this aftik has traversed. `None` means no known
    /// route; callers abort and narrate rather than searching globally.
    pub fn find_door_towards(&self, aftik: ObjectId, target: AreaId) -> Option<ObjectId> {
        let origin = self.state.object(aftik).pos.area;
        if origin == target {
            return None;
        }
        let memory = &self.state.aftik(aftik).mind.memory;

        let mut visited = vec![origin];
        let mut queue: VecDeque<(AreaId, Option<ObjectId>)> = VecDeque::new();
        queue.push_back((origin, None));

        while let Some((area, first_door)) = queue.pop_front() {
            for &(edge_area, pair) in &memory.edges {
                if edge_area != area {
                    continue;
                }
                let Some(door_here) = self.door_of_pair_in(pair, area) else {
                    continue;
                };
                let destination = self.state.door(door_here).destination.area;
                if visited.contains(&destination) {
                    continue;
                }
                visited.push(destination);
                let step = first_door.or(Some(door_here));
                if destination == target {
                    return step;
                }
                queue.push_back((destination, step));
            }
        }
        None
    }

    fn door_of_pair_in(&self, pair: DoorPairId, area: AreaId) -> Option<ObjectId> {
        self.state
            .door_pair(pair)
            .doors
            .iter()
            .copied()
            .find(|&door| self.state.object(door).pos.area == area)
    }
}
