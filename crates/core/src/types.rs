use slotmap::new_key_type;

use serde::{Deserialize, Serialize};

new_key_type! {
    pub struct AreaId;
    pub struct ObjectId;
    pub struct DoorPairId;
}

pub type Coord = i32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub area: AreaId,
    pub coord: Coord,
}

impl Position {
    /// One step toward `target` within the same area; no-op when already there.
    pub fn towards(self, target: Coord) -> Position {
        Position { area: self.area, coord: self.coord + (target - self.coord).signum() }
    }

    pub fn distance_to(self, other: Position) -> Coord {
        assert_eq!(self.area, other.area, "distance across areas is undefined");
        (self.coord - other.coord).abs()
    }

    pub fn is_adjacent_to(self, other: Position) -> bool {
        self.area == other.area && (self.coord - other.coord).abs() <= 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stats {
    pub strength: i32,
    pub endurance: i32,
    pub agility: i32,
}

impl Stats {
    pub fn new(strength: i32, endurance: i32, agility: i32) -> Self {
        Self { strength, endurance, agility }
    }

    pub fn max_health(&self) -> f32 {
        (4 * self.endurance) as f32
    }

    pub fn max_stamina(&self) -> i32 {
        2 * self.endurance
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    FuelCan,
    Crowbar,
    Blowtorch,
    Keycard,
    Knife,
    Bat,
    Sword,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CreatureKind {
    Scuttler,
    Bristleback,
    Cragmaw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DoorKind {
    Door,
    Path,
    ShipHatch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ForceMethod {
    Pry,
    Cut,
}

/// Shared state of a door pair. Both sides of a pair read and write the same
/// cell, looked up by `DoorPairId` in the world's pair table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorProperty {
    Empty,
    Stuck,
    Sealed,
    Locked { pass_item: ItemKind },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorBlockedReason {
    Stuck,
    SealedShut,
    Locked,
}

impl DoorBlockedReason {
    pub fn adjective(self) -> &'static str {
        match self {
            DoorBlockedReason::Stuck => "stuck",
            DoorBlockedReason::SealedShut => "sealed shut",
            DoorBlockedReason::Locked => "locked",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveBlocked {
    pub blocker: ObjectId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnterResult {
    Entered { destination: Position, used_item: Option<ItemKind> },
    DoorBlocked(DoorBlockedReason),
    PathBlocked(MoveBlocked),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForceFailure {
    NeedTool,
    NeedBreakTool,
    NotStuck,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForceResult {
    Forced { method: ForceMethod, tool: ItemKind },
    Failed(ForceFailure),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttackOutcome {
    Dodge,
    GrazingHit,
    DirectHit,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackResult {
    pub outcome: AttackOutcome,
    pub damage: f32,
    pub lethal: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandKind {
    LaunchShip,
    TakeItems,
    Rest,
}

/// One externally-constructed intent per tick for the controlled crew member.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Wait,
    MoveTo(Coord),
    Attack(ObjectId),
    EnterDoor(ObjectId),
    ForceDoor(ObjectId),
    TakeItem(ObjectId),
    Wield(ItemKind),
    Launch,
    Command { target: ObjectId, command: CommandKind },
    SwitchControl(ObjectId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameError {
    RunOver,
    UnknownObject,
    OutOfArea,
    OutOfBounds,
    NotACrewMember,
    NotACreature,
    NotADoor,
    NotAnItem,
    ItemNotHeld,
    NoShip,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Victory,
    Defeat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub outcome: Option<RunOutcome>,
}

/// Addressing mode of a narration entry. `Private` entries are recorded only
/// when the subject is the controlled crew member; `Area` entries are for
/// everyone co-located with the area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogScope {
    Private(ObjectId),
    Area(AreaId),
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub scope: LogScope,
    pub event: LogEvent,
}

/// Structured narration facts. Text formatting is the caller's concern.
#[derive(Clone, Debug, PartialEq)]
pub enum LogEvent {
    MoveBlockedBy { entity: ObjectId, blocker: ObjectId },
    AttackLanded { attacker: ObjectId, target: ObjectId, outcome: AttackOutcome },
    Died { entity: ObjectId },
    LeftThrough { entity: ObjectId, door: ObjectId, used_item: Option<ItemKind> },
    ArrivedThrough { entity: ObjectId, door: ObjectId },
    EntryBlocked { entity: ObjectId, door: ObjectId, reason: DoorBlockedReason },
    DoorForced { entity: ObjectId, door: ObjectId, method: ForceMethod, tool: ItemKind },
    ForceFailed { entity: ObjectId, door: ObjectId, failure: ForceFailure },
    ItemTaken { entity: ObjectId, item: ItemKind },
    Wielded { entity: ObjectId, item: ItemKind },
    CommandCancelled { entity: ObjectId, command: CommandKind },
    RouteUnknown { entity: ObjectId, target: AreaId },
    FuelInstalled { entity: ObjectId, remaining: u32 },
    ShipLaunched { area: AreaId },
    ControlPassed { to: ObjectId },
    CrewLost { name: String },
}
