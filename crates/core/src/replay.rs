use crate::{
    game::Game,
    journal::ActionJournal,
    types::{GameError, RunOutcome},
};

#[derive(Debug, PartialEq, Eq)]
pub enum ReplayError {
    RejectedAction { seq: u64, error: GameError },
}

#[derive(Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_outcome: Option<RunOutcome>,
    pub final_snapshot_hash: u64,
    pub final_tick: u64,
}

/// Rebuild a game from the journal's seed plus the caller's level script and
/// replay every recorded action. Identical journals and scripts must land on
/// identical snapshot hashes.
pub fn replay_to_end(
    journal: &ActionJournal,
    build_level: impl FnOnce(&mut Game),
) -> Result<ReplayResult, ReplayError> {
    let mut game = Game::new(journal.seed);
    build_level(&mut game);

    for record in &journal.actions {
        if game.outcome().is_some() {
            break;
        }
        game.take_turn(record.action)
            .map_err(|error| ReplayError::RejectedAction { seq: record.seq, error })?;
    }

    Ok(ReplayResult {
        final_outcome: game.outcome(),
        final_snapshot_hash: game.snapshot_hash(),
        final_tick: game.current_tick(),
    })
}
