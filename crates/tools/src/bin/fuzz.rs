use anyhow::Result;
use clap::Parser;
use game_core::{
    Action, CommandKind, ContentPack, CreatureKind, DoorKind, DoorProperty, Game, ItemKind,
    ObjectBody, Stats,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    ticks: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn fuzz_level(game: &mut Game) {
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
    game.add_item(ItemKind::Blowtorch, store, 1);
    game.add_item(ItemKind::Keycard, store, 2);
    game.add_item(ItemKind::FuelCan, cargo, 1);
    game.add_item(ItemKind::FuelCan, cargo, 3);
    game.add_item(ItemKind::Sword, store, 3);
    game.add_item(ItemKind::Bat, wreck, 7);

    game.spawn_crew_member("Indigo", Stats::new(5, 4, 6), wreck, 1);
    game.spawn_crew_member("Saffron", Stats::new(4, 5, 4), wreck, 2);
    game.spawn_crew_member("Moss", Stats::new(4, 4, 5), wreck, 2);
    game.spawn_creature(CreatureKind::Scuttler, wreck, 5);
    game.spawn_creature(CreatureKind::Bristleback, store, 4);
    game.spawn_creature(CreatureKind::Cragmaw, cargo, 4);
    game.set_ship(ship, 2);
}

/// Every action that would pass validation for the controlled member right
/// now. The fuzzer only ever feeds the engine plausible external input.
fn candidate_actions(game: &Game) -> Vec<Action> {
    let state = game.state();
    let controlled = state.crew.controlled;
    let pos = state.object(controlled).pos;

    let mut actions = vec![Action::Wait];
    for coord in 0..state.area(pos.area).length {
        actions.push(Action::MoveTo(coord));
    }
    for object in state.objects_in(pos.area) {
        match &object.body {
            ObjectBody::Creature(creature) if creature.entity.is_alive() => {
                actions.push(Action::Attack(object.id));
            }
            ObjectBody::Door(_) => {
                actions.push(Action::EnterDoor(object.id));
                actions.push(Action::ForceDoor(object.id));
            }
            ObjectBody::Item(_) => {
                actions.push(Action::TakeItem(object.id));
            }
            _ => {}
        }
    }
    for item in state.aftik(controlled).held_items() {
        if item.profile().weapon_damage.is_some() {
            actions.push(Action::Wield(item));
        }
    }
    if state.ship.is_some_and(|ship| ship.area == pos.area) {
        actions.push(Action::Launch);
    }
    for &member in &state.crew.members {
        actions.push(Action::SwitchControl(member));
        for command in [CommandKind::LaunchShip, CommandKind::TakeItems, CommandKind::Rest] {
            actions.push(Action::Command { target: member, command });
        }
    }
    actions
}

fn assert_invariants(game: &Game) {
    let state = game.state();

    // Every object sits in exactly one area list, at its own position.
    for (_, area) in state.areas.iter() {
        for &id in &area.objects {
            let object = state.object(id);
            assert_eq!(object.pos.area, area.id, "Invariant failed: area list mismatch");
            assert!(
                object.pos.coord >= 0 && object.pos.coord < area.length,
                "Invariant failed: object outside its area"
            );
        }
    }
    for (id, object) in state.objects.iter() {
        let listed = state
            .areas
            .iter()
            .map(|(_, area)| area.objects.iter().filter(|&&held| held == id).count())
            .sum::<usize>();
        assert_eq!(listed, 1, "Invariant failed: object {:?} listed {} times", object.pos, listed);
    }

    // Vitals stay in range.
    for (id, _) in state.objects.iter() {
        if let Some(data) = state.entity_data(id) {
            assert!(data.health <= data.stats.max_health(), "Invariant failed: health > max");
            assert!(
                data.stamina >= 0 && data.stamina <= data.stats.max_stamina(),
                "Invariant failed: stamina out of range"
            );
        }
    }

    // Door pairs stay mutually consistent.
    for (_, pair) in state.door_pairs.iter() {
        let [a, b] = pair.doors;
        let door_a = state.door(a);
        let door_b = state.door(b);
        assert_eq!(door_a.destination, state.object(b).pos, "Invariant failed: pair link");
        assert_eq!(door_b.destination, state.object(a).pos, "Invariant failed: pair link");
    }

    // The crew roster only holds living members.
    for &member in &state.crew.members {
        assert!(state.is_alive(member), "Invariant failed: dead crew member on the roster");
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let content = ContentPack::default();
    println!(
        "Starting fuzz harness on seed {} for max {} ticks ({} item kinds, {} creature kinds)...",
        args.seed,
        args.ticks,
        content.items.len(),
        content.creatures.len()
    );
    let mut game = Game::new(args.seed);
    fuzz_level(&mut game);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for _ in 0..args.ticks {
        let actions = candidate_actions(&game);
        let action = choose(&mut rng, &actions);
        let report = game.take_turn(action).expect("fuzz applied invalid action");
        assert_invariants(&game);

        if let Some(outcome) = report.outcome {
            println!("Finished with outcome {:?} after {} ticks", outcome, game.current_tick());
            break;
        }
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
