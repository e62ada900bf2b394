use bloxorz::core::{LevelData, RunEvent, RunState, Settle};
use bloxorz::types::{
    Command, CommandOutcome, Coord, Orientation, RunStatus, LIVES_EXHAUSTED, START_LIVES, TICK_MS,
};

fn roll(run: &mut RunState, cmd: Command) {
    assert_eq!(run.on_command(cmd), CommandOutcome::Accepted, "{cmd:?}");
    for _ in 0..8 {
        run.tick(TICK_MS).unwrap();
    }
    assert!(!run.block().is_rolling(), "roll commits after 8 ticks");
}

fn tick_until_respawn(run: &mut RunState) {
    let lives = run.lives();
    for _ in 0..200 {
        run.tick(TICK_MS).unwrap();
        if run.lives() != lives {
            return;
        }
    }
    panic!("block never landed back at spawn");
}

fn bridge_up(run: &RunState) -> Vec<bool> {
    let level = run.level();
    level
        .bridge
        .iter()
        .map(|&at| level.grid.is_supported(at))
        .collect()
}

#[test]
fn first_left_from_spawn_lies_along_x() {
    let mut run = RunState::new().unwrap();
    roll(&mut run, Command::Left);
    assert_eq!(run.block().orientation(), Orientation::LyingAlongX);
    assert_eq!(run.block().primary(), Coord::new(5, 3));
    assert_eq!(run.block().secondary(), Some(Coord::new(6, 3)));
}

#[test]
fn lying_block_slides_sideways() {
    let mut run = RunState::new().unwrap();
    roll(&mut run, Command::Right);
    roll(&mut run, Command::Up);
    assert_eq!(run.block().orientation(), Orientation::LyingAlongX);
    assert_eq!(
        run.block().cells().as_slice(),
        &[Coord::new(8, 2), Coord::new(9, 2)]
    );
    // (9,2) is a hole but (8,2) holds the block.
    assert!(run.block().is_idle());
}

#[test]
fn commands_while_busy_are_free() {
    let mut run = RunState::new().unwrap();
    assert_eq!(run.on_command(Command::Down), CommandOutcome::Accepted);
    for cmd in Command::ALL {
        assert_eq!(run.on_command(cmd), CommandOutcome::Busy);
    }
    assert_eq!(run.score(), 1);
    assert_eq!(run.take_events().as_slice(), &[RunEvent::Rolled(Command::Down)]);
}

#[test]
fn trigger_toggles_bridge_each_time_it_is_occupied() {
    let mut run = RunState::new().unwrap();
    assert_eq!(bridge_up(&run), vec![false, false]);

    roll(&mut run, Command::Right);
    roll(&mut run, Command::Down);
    assert!(run.block().cells().contains(&Coord::new(8, 4)));
    assert_eq!(bridge_up(&run), vec![true, true]);
    assert!(run
        .take_events()
        .contains(&RunEvent::Settled(Settle::BridgeToggled(Coord::new(8, 4)))));

    // Leaving the trigger does nothing; coming back flips the bridge again.
    roll(&mut run, Command::Up);
    assert_eq!(bridge_up(&run), vec![true, true]);
    roll(&mut run, Command::Down);
    assert_eq!(bridge_up(&run), vec![false, false]);
}

#[test]
fn fragile_tile_breaks_once_and_stays_broken() {
    let mut run = RunState::new().unwrap();
    let fragile = Coord::new(10, 3);

    roll(&mut run, Command::Right);
    roll(&mut run, Command::Right);
    assert_eq!(run.block().primary(), fragile);
    assert!(run.block().is_falling());
    assert!(run
        .take_events()
        .contains(&RunEvent::Settled(Settle::FragileBroke(fragile))));

    tick_until_respawn(&mut run);
    assert_eq!(run.lives(), START_LIVES - 1);
    assert_eq!(run.score(), 0);
    assert_eq!(run.block().primary(), Coord::new(7, 3));
    assert!(!run.level().grid.is_supported(fragile));

    roll(&mut run, Command::Right);
    roll(&mut run, Command::Right);
    assert!(run.block().is_falling());
    assert!(run
        .take_events()
        .contains(&RunEvent::Settled(Settle::Unsupported)));
}

#[test]
fn lying_across_fragile_is_safe() {
    let mut run = RunState::new().unwrap();
    // Stand on (9,3) via the lower rows, then tip right over the fragile tile.
    for cmd in [Command::Down, Command::Right, Command::Right, Command::Up] {
        roll(&mut run, cmd);
    }
    assert_eq!(run.block().primary(), Coord::new(9, 3));
    assert_eq!(run.block().orientation(), Orientation::Standing);

    roll(&mut run, Command::Right);
    assert_eq!(
        run.block().cells().as_slice(),
        &[Coord::new(10, 3), Coord::new(11, 3)]
    );
    assert!(!run.block().is_falling());
    assert!(run.level().is_fragile(Coord::new(10, 3)));
    assert!(run.level().grid.is_supported(Coord::new(10, 3)));
}

#[test]
fn teleporter_and_guard() {
    let mut run = RunState::with_campaign(vec![LevelData::level_two()]).unwrap();
    roll(&mut run, Command::Down);
    roll(&mut run, Command::Right);
    roll(&mut run, Command::Right);
    roll(&mut run, Command::Up);

    assert_eq!(run.block().orientation(), Orientation::Standing);
    assert_eq!(run.block().primary(), Coord::new(1, 2));
    assert!(run.block().teleport_guard());
    assert!(run.take_events().contains(&RunEvent::Settled(Settle::Teleported {
        from: Coord::new(9, 3),
        to: Coord::new(1, 2),
    })));

    // Rolling away clears the guard, so standing on the pad again sends it back.
    roll(&mut run, Command::Down);
    assert!(!run.block().teleport_guard());
    roll(&mut run, Command::Up);
    assert_eq!(run.block().primary(), Coord::new(9, 3));
}

#[test]
fn losing_every_life_ends_the_run() {
    let mut run = RunState::new().unwrap();
    let mut deaths = 0;
    while run.status() == RunStatus::Playing {
        roll(&mut run, Command::Up);
        roll(&mut run, Command::Up);
        tick_until_respawn(&mut run);
        deaths += 1;
    }
    assert_eq!(deaths, START_LIVES - LIVES_EXHAUSTED);
    assert_eq!(run.status(), RunStatus::Lost);
    assert_eq!(run.lives(), LIVES_EXHAUSTED);
    assert_eq!(run.take_events().last(), Some(&RunEvent::Lost));
    assert_eq!(run.on_command(Command::Down), CommandOutcome::Ignored);
}
