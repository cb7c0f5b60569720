use anyhow::{Context, Result};
use clap::Parser;
use game_core::{
    ActionJournal, CreatureKind, DoorKind, DoorProperty, Game, ItemKind, ReplayResult, Stats,
    replay::replay_to_end,
};
use std::fs;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the journal JSON file to replay against the demo level
    #[arg(short, long)]
    journal: String,
}

/// The demo level that recorded journals are replayed against: a wreck site
/// with a stuck storehouse, a locked cargo bay, and the ship.
fn demo_level(game: &mut Game) {
    let wreck = game.new_area("wreck site", 8);
    let store = game.new_area("storehouse", 5);
    let cargo = game.new_area("cargo bay", 5);
    let ship = game.new_area("ship", 4);

    game.create_door_pair(
        (wreck, 6, DoorKind::Door),
        (store, 0, DoorKind::Door),
        DoorProperty::Stuck,
    );
    game.create_door_pair(
        (store, 4, DoorKind::Door),
        (cargo, 0, DoorKind::Door),
        DoorProperty::Locked { pass_item: ItemKind::Keycard },
    );
    game.create_door_pair(
        (wreck, 0, DoorKind::ShipHatch),
        (ship, 0, DoorKind::ShipHatch),
        DoorProperty::Empty,
    );

    game.add_item(ItemKind::Crowbar, wreck, 3);
    game.add_item(ItemKind::Keycard, store, 2);
    game.add_item(ItemKind::FuelCan, cargo, 1);
    game.add_item(ItemKind::FuelCan, cargo, 3);
    game.add_item(ItemKind::Sword, store, 3);

    game.spawn_crew_member("Indigo", Stats::new(5, 4, 6), wreck, 1);
    game.spawn_crew_member("Saffron", Stats::new(4, 5, 4), wreck, 2);
    game.spawn_creature(CreatureKind::Scuttler, wreck, 5);
    game.spawn_creature(CreatureKind::Cragmaw, cargo, 4);
    game.set_ship(ship, 2);
}

fn main() -> Result<()> {
    let args = Args::parse();

    let journal_data = fs::read_to_string(&args.journal)
        .with_context(|| format!("Failed to read journal file: {}", args.journal))?;
    let journal: ActionJournal =
        serde_json::from_str(&journal_data).with_context(|| "Failed to deserialize journal JSON")?;

    let result: ReplayResult = replay_to_end(&journal, demo_level)
        .map_err(|e| anyhow::anyhow!("Replay failed during execution: {:?}", e))?;

    println!("Replay complete.");
    println!("Final Tick: {}", result.final_tick);
    println!("Outcome: {:?}", result.final_outcome);
    println!("Snapshot Hash: {}", result.final_snapshot_hash);

    Ok(())
}
