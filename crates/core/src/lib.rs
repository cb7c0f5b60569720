pub mod content;
pub mod game;
pub mod journal;
pub mod replay;
pub mod state;
pub mod types;

pub use content::ContentPack;
pub use game::Game;
pub use journal::{ActionJournal, ActionRecord};
pub use replay::*;
pub use state::{
    Aftik, Area, Creature, Crew, EntityData, GameObject, GameState, Memory, Mind, ObjectBody, Ship,
};
pub use types::*;
