use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use slotmap::Key;

use crate::state::*;
use crate::types::*;

mod combat;
mod doors;
mod memory;
mod mind;
mod movement;
mod tick;

#[cfg(test)]
mod test_support;

pub struct Game {
    seed: u64,
    tick: u64,
    rng: ChaCha8Rng,
    state: GameState,
    log: Vec<LogEntry>,
    outcome: Option<RunOutcome>,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            tick: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            state: GameState::new(),
            log: Vec::new(),
            outcome: None,
        }
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for external collaborators (level builders, shop
    /// bookkeeping). Simulation flow goes through `take_turn`.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    // Level construction factories. Invalid placements are caller bugs and
    // abort inside `GameState`.

    pub fn new_area(&mut self, label: impl Into<String>, length: Coord) -> AreaId {
        self.state.new_area(label, length)
    }

    pub fn add_item(&mut self, kind: ItemKind, area: AreaId, coord: Coord) -> ObjectId {
        let pos = self.state.position(area, coord);
        self.state.add_object(pos, ObjectBody::Item(kind))
    }

    pub fn spawn_creature(&mut self, kind: CreatureKind, area: AreaId, coord: Coord) -> ObjectId {
        let pos = self.state.position(area, coord);
        self.state.add_object(pos, ObjectBody::Creature(Creature::new(kind)))
    }

    pub fn spawn_crew_member(
        &mut self,
        name: impl Into<String>,
        stats: Stats,
        area: AreaId,
        coord: Coord,
    ) -> ObjectId {
        assert!(self.state.crew.members.len() < CREW_CAPACITY, "crew is at capacity");
        let pos = self.state.position(area, coord);
        let id = self.state.add_object(pos, ObjectBody::Aftik(Aftik::new(name, stats)));
        if self.state.crew.members.is_empty() {
            self.state.crew.controlled = id;
        }
        self.state.crew.members.push(id);
        id
    }

    pub fn create_door_pair(
        &mut self,
        side_a: (AreaId, Coord, DoorKind),
        side_b: (AreaId, Coord, DoorKind),
        property: DoorProperty,
    ) -> DoorPairId {
        let pos_a = self.state.position(side_a.0, side_a.1);
        let pos_b = self.state.position(side_b.0, side_b.1);
        let pair = self
            .state
            .door_pairs
            .insert(DoorPair { property, doors: [ObjectId::default(); 2] });
        let door_a = self.state.add_object(
            pos_a,
            ObjectBody::Door(Door { kind: side_a.2, destination: pos_b, pair }),
        );
        let door_b = self.state.add_object(
            pos_b,
            ObjectBody::Door(Door { kind: side_b.2, destination: pos_a, pair }),
        );
        self.state.door_pairs[pair].doors = [door_a, door_b];
        pair
    }

    pub fn set_ship(&mut self, area: AreaId, fuel_need: u32) {
        self.state.ship = Some(Ship { area, fuel_need, launched: false });
    }

    pub(crate) fn report_private(&mut self, entity: ObjectId, event: LogEvent) {
        if self.state.crew.controlled == entity {
            self.log.push(LogEntry { scope: LogScope::Private(entity), event });
        }
    }

    pub(crate) fn report_area(&mut self, area: AreaId, event: LogEvent) {
        self.log.push(LogEntry { scope: LogScope::Area(area), event });
    }

    pub fn snapshot_hash(&self) -> u64 {
        use std::hash::Hasher;
        use xxhash_rust::xxh3::Xxh3;

        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);

        for (_, area) in self.state.areas.iter() {
            hasher.write(area.label.as_bytes());
            hasher.write_i32(area.length);
            for &id in &area.objects {
                let object = self.state.object(id);
                hasher.write_i32(object.pos.coord);
                hash_body(&mut hasher, &object.body);
            }
        }

        for (id, pair) in self.state.door_pairs.iter() {
            hasher.write_u64(id.data().as_ffi());
            hash_pair_property(&mut hasher, pair.property);
        }

        hasher.write_usize(self.state.crew.members.len());
        hasher.write_i32(self.state.crew.points);
        let controlled_slot = self
            .state
            .crew
            .members
            .iter()
            .position(|&member| member == self.state.crew.controlled);
        hasher.write_usize(controlled_slot.unwrap_or(usize::MAX));

        if let Some(ship) = self.state.ship {
            hasher.write_u32(ship.fuel_need);
            hasher.write_u8(ship.launched as u8);
        }

        hasher.finish()
    }
}

fn hash_body(hasher: &mut impl std::hash::Hasher, body: &ObjectBody) {
    match body {
        ObjectBody::Item(kind) => {
            hasher.write_u8(0);
            hasher.write_u8(*kind as u8);
        }
        ObjectBody::Door(door) => {
            hasher.write_u8(1);
            hasher.write_u8(door.kind as u8);
            hasher.write_u64(door.pair.data().as_ffi());
            hasher.write_i32(door.destination.coord);
        }
        ObjectBody::Aftik(aftik) => {
            hasher.write_u8(2);
            hasher.write(aftik.name.as_bytes());
            hasher.write_u32(aftik.entity.health.to_bits());
            hasher.write_i32(aftik.entity.stamina);
            for &item in &aftik.inventory {
                hasher.write_u8(item as u8);
            }
            hasher.write_u8(aftik.wielded.map_or(u8::MAX, |item| item as u8));
        }
        ObjectBody::Creature(creature) => {
            hasher.write_u8(3);
            hasher.write_u8(creature.kind as u8);
            hasher.write_u32(creature.entity.health.to_bits());
            hasher.write_i32(creature.entity.stamina);
        }
    }
}

fn hash_pair_property(hasher: &mut impl std::hash::Hasher, property: DoorProperty) {
    match property {
        DoorProperty::Empty => hasher.write_u8(0),
        DoorProperty::Stuck => hasher.write_u8(1),
        DoorProperty::Sealed => hasher.write_u8(2),
        DoorProperty::Locked { pass_item } => {
            hasher.write_u8(3);
            hasher.write_u8(pass_item as u8);
        }
    }
}
