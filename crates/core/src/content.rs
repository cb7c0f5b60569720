use crate::types::{CreatureKind, DoorKind, ForceMethod, ItemKind, Stats};

#[derive(Clone, Copy, Debug)]
pub struct ItemProfile {
    pub symbol: char,
    pub name: &'static str,
    pub weight: i32,
    pub weapon_damage: Option<f32>,
    pub force_method: Option<ForceMethod>,
    pub price: Option<i32>,
}

impl ItemKind {
    pub const ALL: [ItemKind; 7] = [
        ItemKind::FuelCan,
        ItemKind::Crowbar,
        ItemKind::Blowtorch,
        ItemKind::Keycard,
        ItemKind::Knife,
        ItemKind::Bat,
        ItemKind::Sword,
    ];

    pub fn profile(self) -> ItemProfile {
        match self {
            ItemKind::FuelCan => ItemProfile {
                symbol: 'f',
                name: "fuel can",
                weight: 3,
                weapon_damage: None,
                force_method: None,
                price: Some(120),
            },
            ItemKind::Crowbar => ItemProfile {
                symbol: 'c',
                name: "crowbar",
                weight: 2,
                weapon_damage: Some(3.0),
                force_method: Some(ForceMethod::Pry),
                price: Some(60),
            },
            ItemKind::Blowtorch => ItemProfile {
                symbol: 'b',
                name: "blowtorch",
                weight: 2,
                weapon_damage: None,
                force_method: Some(ForceMethod::Cut),
                price: Some(140),
            },
            ItemKind::Keycard => ItemProfile {
                symbol: 'k',
                name: "keycard",
                weight: 1,
                weapon_damage: None,
                force_method: None,
                price: None,
            },
            ItemKind::Knife => ItemProfile {
                symbol: 'K',
                name: "knife",
                weight: 1,
                weapon_damage: Some(3.0),
                force_method: None,
                price: Some(40),
            },
            ItemKind::Bat => ItemProfile {
                symbol: 'B',
                name: "bat",
                weight: 2,
                weapon_damage: Some(4.0),
                force_method: None,
                price: Some(70),
            },
            ItemKind::Sword => ItemProfile {
                symbol: 'S',
                name: "sword",
                weight: 3,
                weapon_damage: Some(5.0),
                force_method: None,
                price: Some(100),
            },
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CreatureProfile {
    pub symbol: char,
    pub name: &'static str,
    pub stats: Stats,
    pub is_moving: bool,
}

impl CreatureKind {
    pub const ALL: [CreatureKind; 3] =
        [CreatureKind::Scuttler, CreatureKind::Bristleback, CreatureKind::Cragmaw];

    pub fn profile(self) -> CreatureProfile {
        match self {
            CreatureKind::Scuttler => CreatureProfile {
                symbol: 'z',
                name: "scuttler",
                stats: Stats::new(3, 2, 8),
                is_moving: true,
            },
            CreatureKind::Bristleback => CreatureProfile {
                symbol: 'q',
                name: "bristleback",
                stats: Stats::new(4, 5, 3),
                is_moving: true,
            },
            // Lurker: hits hard but never approaches on its own.
            CreatureKind::Cragmaw => CreatureProfile {
                symbol: 'M',
                name: "cragmaw",
                stats: Stats::new(6, 6, 1),
                is_moving: false,
            },
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct DoorProfile {
    pub symbol: char,
    pub name: &'static str,
}

impl DoorKind {
    pub fn profile(self) -> DoorProfile {
        match self {
            DoorKind::Door => DoorProfile { symbol: '^', name: "door" },
            DoorKind::Path => DoorProfile { symbol: '~', name: "path" },
            DoorKind::ShipHatch => DoorProfile { symbol: '=', name: "ship hatch" },
        }
    }
}

/// Enumeration registry for harnesses that need to iterate over every defined
/// kind (fuzzing, content listings). Gameplay code reads profiles directly.
pub struct ContentPack {
    pub items: Vec<(ItemKind, ItemProfile)>,
    pub creatures: Vec<(CreatureKind, CreatureProfile)>,
}

impl ContentPack {
    pub fn build_default() -> Self {
        Self {
            items: ItemKind::ALL.iter().map(|&kind| (kind, kind.profile())).collect(),
            creatures: CreatureKind::ALL.iter().map(|&kind| (kind, kind.profile())).collect(),
        }
    }
}

impl Default for ContentPack {
    fn default() -> Self {
        Self::build_default()
    }
}
