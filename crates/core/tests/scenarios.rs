use strandfall_core::{
    Action, CommandKind, CreatureKind, DoorKind, DoorProperty, Game, ItemKind, LogEvent,
    RunOutcome, Stats,
};

#[test]
fn salvage_run_forces_the_door_fuels_the_ship_and_wins() {
    let mut game = Game::new(99);
    let wreck = game.new_area("wreck site", 8);
    let store = game.new_area("storehouse", 5);
    let ship = game.new_area("ship", 4);
    let store_pair = game.create_door_pair(
        (wreck, 6, DoorKind::Door),
        (store, 0, DoorKind::Door),
        DoorProperty::Stuck,
    );
    let hatch_pair = game.create_door_pair(
        (wreck, 0, DoorKind::ShipHatch),
        (ship, 0, DoorKind::ShipHatch),
        DoorProperty::Empty,
    );
    let [store_door, store_door_far] = game.state().door_pair(store_pair).doors;
    let [hatch, _] = game.state().door_pair(hatch_pair).doors;
    let crowbar = game.add_item(ItemKind::Crowbar, wreck, 3);
    let fuel_a = game.add_item(ItemKind::FuelCan, store, 2);
    let fuel_b = game.add_item(ItemKind::FuelCan, store, 4);
    let leader = game.spawn_crew_member("Indigo", Stats::new(5, 4, 6), wreck, 1);
    game.set_ship(ship, 2);

    game.take_turn(Action::TakeItem(crowbar)).expect("pick up the crowbar");

    // The stuck door refuses entry, yields to the crowbar, and stays open.
    game.take_turn(Action::EnterDoor(store_door)).expect("tick runs");
    assert_eq!(game.state().object(leader).pos.area, wreck);
    game.take_turn(Action::ForceDoor(store_door)).expect("force the door");
    assert_eq!(game.state().door_property(store_pair), DoorProperty::Empty);

    game.take_turn(Action::EnterDoor(store_door)).expect("enter the storehouse");
    assert_eq!(game.state().object(leader).pos.area, store);

    game.take_turn(Action::TakeItem(fuel_a)).expect("first can");
    game.take_turn(Action::TakeItem(fuel_b)).expect("second can");
    game.take_turn(Action::EnterDoor(store_door_far)).expect("back out");
    game.take_turn(Action::EnterDoor(hatch)).expect("board the ship");

    let report = game.take_turn(Action::Launch).expect("install the first can");
    assert_eq!(report.outcome, None);
    assert_eq!(game.state().ship.expect("ship").fuel_need, 1);

    let report = game.take_turn(Action::Launch).expect("install and lift off");
    assert_eq!(report.outcome, Some(RunOutcome::Victory));
    assert!(game.log().iter().any(|entry| matches!(entry.event, LogEvent::ShipLaunched { .. })));
}

#[test]
fn keycard_passage_is_reusable_across_repeated_trips() {
    let mut game = Game::new(4);
    let hall = game.new_area("hall", 6);
    let vault = game.new_area("vault", 4);
    let pair = game.create_door_pair(
        (hall, 4, DoorKind::Door),
        (vault, 0, DoorKind::Door),
        DoorProperty::Locked { pass_item: ItemKind::Keycard },
    );
    let [hall_door, vault_door] = game.state().door_pair(pair).doors;
    let keycard = game.add_item(ItemKind::Keycard, hall, 2);
    let leader = game.spawn_crew_member("Indigo", Stats::new(5, 4, 6), hall, 1);

    // Without the card the lock holds.
    game.take_turn(Action::EnterDoor(hall_door)).expect("tick runs");
    assert_eq!(game.state().object(leader).pos.area, hall);

    game.take_turn(Action::TakeItem(keycard)).expect("pick up the card");
    for _ in 0..3 {
        game.take_turn(Action::EnterDoor(hall_door)).expect("pass in");
        assert_eq!(game.state().object(leader).pos.area, vault);
        game.take_turn(Action::EnterDoor(vault_door)).expect("pass out");
        assert_eq!(game.state().object(leader).pos.area, hall);
    }
    // The card never gets consumed, and the lock never clears.
    assert!(game.state().aftik(leader).has_item(ItemKind::Keycard));
    assert_eq!(
        game.state().door_property(pair),
        DoorProperty::Locked { pass_item: ItemKind::Keycard }
    );
}

#[test]
fn the_whole_crew_follows_the_leader_through_a_door() {
    let mut game = Game::new(21);
    let field = game.new_area("field", 6);
    let cabin = game.new_area("cabin", 5);
    let pair = game.create_door_pair(
        (field, 4, DoorKind::Door),
        (cabin, 0, DoorKind::Door),
        DoorProperty::Empty,
    );
    let [field_door, _] = game.state().door_pair(pair).doors;
    let leader = game.spawn_crew_member("Indigo", Stats::new(5, 4, 6), field, 1);
    let second = game.spawn_crew_member("Saffron", Stats::new(4, 5, 4), field, 2);
    let third = game.spawn_crew_member("Moss", Stats::new(4, 4, 5), field, 3);

    game.take_turn(Action::EnterDoor(field_door)).expect("leader enters");
    assert_eq!(game.state().object(leader).pos.area, cabin);
    assert_eq!(game.state().object(second).pos.area, field);
    assert_eq!(game.state().object(third).pos.area, field);

    game.take_turn(Action::Wait).expect("tick runs");
    assert_eq!(game.state().object(second).pos.area, cabin);
    assert_eq!(game.state().object(third).pos.area, cabin);
}

#[test]
fn outnumbered_crew_without_weapons_is_eventually_defeated() {
    let mut game = Game::new(31);
    let pit = game.new_area("pit", 6);
    let leader = game.spawn_crew_member("Indigo", Stats::new(4, 3, 4), pit, 2);
    game.spawn_creature(CreatureKind::Bristleback, pit, 0);
    game.spawn_creature(CreatureKind::Bristleback, pit, 5);

    let mut outcome = None;
    for _ in 0..60 {
        let report = game.take_turn(Action::Wait).expect("tick runs");
        if report.outcome.is_some() {
            outcome = report.outcome;
            break;
        }
    }
    assert_eq!(outcome, Some(RunOutcome::Defeat));
    assert!(!game.state().objects.contains_key(leader));
    assert!(game.state().crew.members.is_empty());
}

#[test]
fn commanded_crew_gathers_loot_while_the_leader_scouts() {
    let mut game = Game::new(8);
    let field = game.new_area("field", 8);
    let cabin = game.new_area("cabin", 4);
    let pair = game.create_door_pair(
        (field, 7, DoorKind::Door),
        (cabin, 0, DoorKind::Door),
        DoorProperty::Empty,
    );
    let [field_door, _] = game.state().door_pair(pair).doors;
    let _leader = game.spawn_crew_member("Indigo", Stats::new(5, 4, 6), field, 1);
    let gatherer = game.spawn_crew_member("Saffron", Stats::new(4, 5, 4), field, 1);
    game.add_item(ItemKind::Knife, field, 3);
    game.add_item(ItemKind::FuelCan, field, 5);

    game.take_turn(Action::Command { target: gatherer, command: CommandKind::TakeItems })
        .expect("command installs");
    // The active command suspends following, so the gatherer finishes the
    // sweep while the leader scouts ahead.
    game.take_turn(Action::EnterDoor(field_door)).expect("leader scouts ahead");
    let gatherer_state = game.state().aftik(gatherer);
    assert!(gatherer_state.has_item(ItemKind::Knife));
    assert!(gatherer_state.has_item(ItemKind::FuelCan));
    assert_eq!(game.state().object(gatherer).pos.area, field);

    // With the command finished, the still-fresh follow plan fires.
    game.take_turn(Action::Wait).expect("tick runs");
    assert_eq!(game.state().object(gatherer).pos.area, cabin);
}
