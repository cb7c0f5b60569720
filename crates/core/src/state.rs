use slotmap::SlotMap;

use crate::types::*;

pub const CREW_CAPACITY: usize = 4;

#[derive(Clone, Debug)]
pub struct Area {
    pub id: AreaId,
    pub label: String,
    pub length: Coord,
    pub objects: Vec<ObjectId>,
}

#[derive(Clone, Copy, Debug)]
pub struct EntityData {
    pub stats: Stats,
    pub health: f32,
    pub stamina: i32,
}

impl EntityData {
    pub fn new(stats: Stats) -> Self {
        Self { stats, health: stats.max_health(), stamina: stats.max_stamina() }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FollowPlan {
    pub door: ObjectId,
    pub observed_tick: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForcePlan {
    pub door: ObjectId,
    pub scheduled_tick: u64,
}

/// Door connections this aftik has personally traversed. Deliberately
/// incomplete: route searches never consult the full level graph.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    pub edges: Vec<(AreaId, DoorPairId)>,
}

impl Memory {
    pub fn record(&mut self, area: AreaId, pair: DoorPairId) {
        if !self.edges.contains(&(area, pair)) {
            self.edges.push((area, pair));
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Mind {
    pub command: Option<CommandKind>,
    pub follow: Option<FollowPlan>,
    pub pending_force: Option<ForcePlan>,
    pub memory: Memory,
}

#[derive(Clone, Debug)]
pub struct Aftik {
    pub name: String,
    pub entity: EntityData,
    pub inventory: Vec<ItemKind>,
    pub wielded: Option<ItemKind>,
    pub mind: Mind,
}

impl Aftik {
    pub fn new(name: impl Into<String>, stats: Stats) -> Self {
        Self {
            name: name.into(),
            entity: EntityData::new(stats),
            inventory: Vec::new(),
            wielded: None,
            mind: Mind::default(),
        }
    }

    pub fn has_item(&self, kind: ItemKind) -> bool {
        self.wielded == Some(kind) || self.inventory.contains(&kind)
    }

    pub fn add_item(&mut self, kind: ItemKind) {
        self.inventory.push(kind);
    }

    /// Removes one occurrence, preferring the inventory over the wielded slot.
    pub fn remove_item(&mut self, kind: ItemKind) -> bool {
        if let Some(index) = self.inventory.iter().position(|&held| held == kind) {
            self.inventory.remove(index);
            return true;
        }
        if self.wielded == Some(kind) {
            self.wielded = None;
            return true;
        }
        false
    }

    pub fn held_items(&self) -> Vec<ItemKind> {
        let mut held = self.inventory.clone();
        held.extend(self.wielded);
        held
    }
}

#[derive(Clone, Debug)]
pub struct Creature {
    pub kind: CreatureKind,
    pub entity: EntityData,
    // Target list snapshotted once per tick during the prepare phase.
    pub targets: Vec<ObjectId>,
}

impl Creature {
    pub fn new(kind: CreatureKind) -> Self {
        Self { kind, entity: EntityData::new(kind.profile().stats), targets: Vec::new() }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Door {
    pub kind: DoorKind,
    pub destination: Position,
    pub pair: DoorPairId,
}

#[derive(Clone, Debug)]
pub enum ObjectBody {
    Item(ItemKind),
    Door(Door),
    Aftik(Aftik),
    Creature(Creature),
}

#[derive(Clone, Debug)]
pub struct GameObject {
    pub id: ObjectId,
    pub pos: Position,
    pub body: ObjectBody,
}

#[derive(Clone, Copy, Debug)]
pub struct DoorPair {
    pub property: DoorProperty,
    pub doors: [ObjectId; 2],
}

#[derive(Clone, Debug)]
pub struct Crew {
    pub members: Vec<ObjectId>,
    pub controlled: ObjectId,
    pub points: i32,
}

impl Crew {
    pub fn new() -> Self {
        Self { members: Vec::new(), controlled: ObjectId::default(), points: 0 }
    }
}

impl Default for Crew {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Ship {
    pub area: AreaId,
    pub fuel_need: u32,
    pub launched: bool,
}

pub struct GameState {
    pub areas: SlotMap<AreaId, Area>,
    pub objects: SlotMap<ObjectId, GameObject>,
    pub door_pairs: SlotMap<DoorPairId, DoorPair>,
    pub crew: Crew,
    pub ship: Option<Ship>,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            areas: SlotMap::with_key(),
            objects: SlotMap::with_key(),
            door_pairs: SlotMap::with_key(),
            crew: Crew::new(),
            ship: None,
        }
    }

    pub fn new_area(&mut self, label: impl Into<String>, length: Coord) -> AreaId {
        assert!(length > 0, "area length must be positive");
        let id = self.areas.insert(Area {
            id: AreaId::default(),
            label: label.into(),
            length,
            objects: Vec::new(),
        });
        self.areas[id].id = id;
        id
    }

    /// Validated position constructor. Out-of-range coordinates are a caller
    /// bug and abort.
    pub fn position(&self, area: AreaId, coord: Coord) -> Position {
        let length = self.areas.get(area).expect("position in unknown area").length;
        assert!(
            (0..length).contains(&coord),
            "coordinate {coord} outside area of length {length}"
        );
        Position { area, coord }
    }

    pub fn add_object(&mut self, pos: Position, body: ObjectBody) -> ObjectId {
        // Revalidates so stale positions cannot smuggle objects out of bounds.
        let pos = self.position(pos.area, pos.coord);
        let id = self.objects.insert(GameObject { id: ObjectId::default(), pos, body });
        self.objects[id].id = id;
        self.areas[pos.area].objects.push(id);
        id
    }

    pub fn remove_object(&mut self, id: ObjectId) {
        let object = self.objects.remove(id).expect("removing unknown object");
        self.areas[object.pos.area].objects.retain(|&held| held != id);
    }

    /// Cross-area move: drop from the old area's list, append to the new one.
    /// Same-area coordinate shifts go through `object_mut` instead.
    pub fn transfer(&mut self, id: ObjectId, destination: Position) {
        let destination = self.position(destination.area, destination.coord);
        let origin = self.object(id).pos;
        self.areas[origin.area].objects.retain(|&held| held != id);
        self.areas[destination.area].objects.push(id);
        self.objects[id].pos = destination;
    }

    pub fn object(&self, id: ObjectId) -> &GameObject {
        self.objects.get(id).expect("stale object id")
    }

    pub fn object_mut(&mut self, id: ObjectId) -> &mut GameObject {
        self.objects.get_mut(id).expect("stale object id")
    }

    pub fn area(&self, id: AreaId) -> &Area {
        self.areas.get(id).expect("stale area id")
    }

    pub fn objects_in(&self, area: AreaId) -> impl Iterator<Item = &GameObject> {
        self.area(area).objects.iter().map(|&id| self.object(id))
    }

    pub fn aftik(&self, id: ObjectId) -> &Aftik {
        match &self.object(id).body {
            ObjectBody::Aftik(aftik) => aftik,
            other => panic!("object is not an aftik: {other:?}"),
        }
    }

    pub fn aftik_mut(&mut self, id: ObjectId) -> &mut Aftik {
        match &mut self.object_mut(id).body {
            ObjectBody::Aftik(aftik) => aftik,
            other => panic!("object is not an aftik: {other:?}"),
        }
    }

    pub fn creature(&self, id: ObjectId) -> &Creature {
        match &self.object(id).body {
            ObjectBody::Creature(creature) => creature,
            other => panic!("object is not a creature: {other:?}"),
        }
    }

    pub fn creature_mut(&mut self, id: ObjectId) -> &mut Creature {
        match &mut self.object_mut(id).body {
            ObjectBody::Creature(creature) => creature,
            other => panic!("object is not a creature: {other:?}"),
        }
    }

    pub fn door(&self, id: ObjectId) -> &Door {
        match &self.object(id).body {
            ObjectBody::Door(door) => door,
            other => panic!("object is not a door: {other:?}"),
        }
    }

    pub fn entity_data(&self, id: ObjectId) -> Option<&EntityData> {
        match &self.objects.get(id)?.body {
            ObjectBody::Aftik(aftik) => Some(&aftik.entity),
            ObjectBody::Creature(creature) => Some(&creature.entity),
            _ => None,
        }
    }

    pub fn entity_data_mut(&mut self, id: ObjectId) -> Option<&mut EntityData> {
        match &mut self.objects.get_mut(id)?.body {
            ObjectBody::Aftik(aftik) => Some(&mut aftik.entity),
            ObjectBody::Creature(creature) => Some(&mut creature.entity),
            _ => None,
        }
    }

    pub fn is_alive(&self, id: ObjectId) -> bool {
        self.entity_data(id).is_some_and(EntityData::is_alive)
    }

    pub fn door_pair(&self, id: DoorPairId) -> &DoorPair {
        self.door_pairs.get(id).expect("stale door pair id")
    }

    pub fn door_property(&self, id: DoorPairId) -> DoorProperty {
        self.door_pair(id).property
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
