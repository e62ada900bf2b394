use bloxorz::core::RunState;
use bloxorz::term::{AnchorY, FrameBuffer, GameView, Rgb, Viewport};
use bloxorz::types::{Command, RunStatus, TICK_MS};

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    let snap = RunState::new().unwrap().snapshot();
    let view = GameView::default();

    // 20 cells * 2 chars + border = 42 wide, 10 rows + border = 12 tall.
    let fb = view.render(&snap, Viewport::new(42, 12));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(41, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 11).unwrap().ch, '└');
    assert_eq!(fb.get(41, 11).unwrap().ch, '┘');
}

#[test]
fn term_view_draws_block_and_tiles_two_chars_wide() {
    let snap = RunState::new().unwrap().snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(42, 12));

    // Spawn (7,3): x = 1 + 7*2, y = 1 + 3.
    let block = fb.get(15, 4).unwrap();
    assert_eq!(block.ch, '█');
    assert_eq!(block.style.fg, Rgb::new(240, 210, 80));
    assert_eq!(fb.get(16, 4).unwrap(), block);

    // Fragile tile at (10,3).
    assert_eq!(fb.get(21, 4).unwrap().style.fg, Rgb::new(255, 140, 0));
    // Hole at (0,0).
    assert_eq!(fb.get(1, 1).unwrap().ch, '·');
    // Goal at (15,6).
    assert_eq!(fb.get(31, 7).unwrap().ch, '▒');
}

#[test]
fn term_view_marks_rolling_and_falling_block() {
    let mut run = RunState::new().unwrap();
    run.on_command(Command::Up);
    run.tick(TICK_MS).unwrap();
    let fb = GameView::default().render(&run.snapshot(), Viewport::new(42, 12));
    assert_eq!(fb.get(15, 4).unwrap().ch, '▓');

    let mut snap = run.snapshot();
    snap.block.roll = None;
    snap.block.falling = true;
    let fb = GameView::default().render(&snap, Viewport::new(42, 12));
    assert!(fb.get(15, 4).unwrap().style.dim);
}

#[test]
fn term_view_draws_hud_when_wide_enough() {
    let mut snap = RunState::new().unwrap().snapshot();
    snap.score = 1234;
    snap.lives = 2;

    let text = screen_text(&GameView::default().render(&snap, Viewport::new(64, 12)));
    assert!(text.contains("LEVEL"));
    assert!(text.contains("SCORE"));
    assert!(text.contains("1234"));
    assert!(text.contains("LIVES"));

    let narrow = screen_text(&GameView::default().render(&snap, Viewport::new(42, 12)));
    assert!(!narrow.contains("SCORE"));
}

#[test]
fn term_view_shows_end_of_run_overlay() {
    let mut snap = RunState::new().unwrap().snapshot();
    let view = GameView::default();

    snap.status = RunStatus::Lost;
    assert!(screen_text(&view.render(&snap, Viewport::new(42, 12))).contains("GAME OVER"));

    snap.status = RunStatus::Won;
    assert!(screen_text(&view.render(&snap, Viewport::new(42, 12))).contains("YOU WIN"));
}

#[test]
fn term_view_anchor() {
    let snap = RunState::new().unwrap().snapshot();

    let fb = GameView::default().render(&snap, Viewport::new(42, 20));
    // start_y = (20 - 12) / 2 = 4.
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');

    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&snap, Viewport::new(42, 20));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}
