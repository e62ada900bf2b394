//! Terminal runner (default binary).
//!
//! Reads keys with crossterm, steps the engine at a fixed interval and draws a
//! top-down view through the framebuffer renderer.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use bloxorz::core::{RunSnapshot, RunState};
use bloxorz::input::{handle_key_event, should_quit};
use bloxorz::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use bloxorz::types::RunStatus;
use bloxorz::RunnerConfig;

fn main() -> Result<()> {
    let cfg = RunnerConfig::from_env();
    init_logging(&cfg)?;
    info!(?cfg, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &cfg);

    // Always try to restore terminal state.
    let _ = term.exit();

    let snap = result?;
    match snap.status {
        RunStatus::Won => println!("You cleared every level. Final score: {}", snap.score),
        RunStatus::Lost => println!("Game over on level {}.", snap.level),
        RunStatus::Playing => println!("Quit on level {} with score {}.", snap.level, snap.score),
    }
    Ok(())
}

/// Log to a file when `BLOXORZ_LOG_PATH` is set; the terminal is busy drawing.
fn init_logging(cfg: &RunnerConfig) -> Result<()> {
    let Some(path) = &cfg.log_path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, cfg: &RunnerConfig) -> Result<RunSnapshot> {
    let mut run = RunState::new()?;
    let view = GameView::default();
    let mut snap = RunSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(u64::from(cfg.tick_ms));
    let mut last_tick = Instant::now();

    loop {
        run.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        if snap.status.is_over() {
            // Leave the overlay up until the player presses something.
            loop {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        return Ok(snap);
                    }
                }
            }
        }

        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(snap);
                    }
                    if let Some(cmd) = handle_key_event(key) {
                        run.on_command(cmd);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            run.tick(elapsed.as_millis() as u32)?;
            for ev in run.take_events() {
                tracing::trace!(?ev, "run event");
            }
        }
    }
}
