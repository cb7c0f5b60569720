use crate::types::Action;

use serde::{Deserialize, Serialize};

/// In-memory record of a seeded session's external inputs, sufficient to
/// reproduce it exactly against the same level script.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionJournal {
    pub format_version: u16,
    pub seed: u64,
    pub actions: Vec<ActionRecord>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionRecord {
    pub seq: u64,
    pub action: Action,
}

impl ActionJournal {
    pub fn new(seed: u64) -> Self {
        Self { format_version: 1, seed, actions: Vec::new() }
    }

    pub fn append(&mut self, action: Action) {
        let seq = self.actions.len() as u64;
        self.actions.push(ActionRecord { seq, action });
    }
}
