//! Run state module - the level/run controller
//!
//! This module ties together the grid, block and rule evaluator. It owns all
//! mutable simulation state for one playthrough and is driven from exactly two
//! entry points: [`RunState::on_command`] and [`RunState::tick`].

use arrayvec::ArrayVec;
use serde::Serialize;
use tracing::{debug, info};

use crate::block::Block;
use crate::error::{EngineError, Result};
use crate::levels::{builtin_campaign, Level, LevelData};
use crate::rules::{self, Settle};
use crate::snapshot::RunSnapshot;
use crate::types::*;

/// Maximum number of undrained events kept between frames.
const EVENT_CAPACITY: usize = 8;

/// Something the host may want to react to (sound, HUD flash).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunEvent {
    /// A command was accepted and a roll started.
    Rolled(Command),
    /// A roll committed and the settle rules ran.
    Settled(Settle),
    /// The falling block passed the death height and respawned.
    Died { lives_left: i32 },
    /// Goal reached on a level that has a successor.
    LevelCompleted { level: u8 },
    Won,
    Lost,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct RunState {
    campaign: Vec<LevelData>,
    level_index: usize,
    level: Level,
    block: Block,
    score: u32,
    lives: i32,
    status: RunStatus,
    /// Number of ticks processed while playing.
    tick_count: u64,
    /// Sum of the `elapsed_ms` passed to `tick`; informational only.
    elapsed_ms: u64,
    events: ArrayVec<RunEvent, EVENT_CAPACITY>,
}

impl RunState {
    /// Start a run on the built-in two-level campaign.
    pub fn new() -> Result<Self> {
        Self::with_campaign(builtin_campaign())
    }

    /// Start a run on an arbitrary ordered list of levels.
    pub fn with_campaign(campaign: Vec<LevelData>) -> Result<Self> {
        let first = campaign.first().ok_or(EngineError::EmptyCampaign)?;
        let level = Level::activate(first)?;
        let block = Block::new(level.spawn);
        info!(levels = campaign.len(), "run started");

        Ok(Self {
            campaign,
            level_index: 0,
            level,
            block,
            score: 0,
            lives: START_LIVES,
            status: RunStatus::Playing,
            tick_count: 0,
            elapsed_ms: 0,
            events: ArrayVec::new(),
        })
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    /// 1-based number of the active level.
    pub fn level_number(&self) -> u8 {
        self.level.number
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn block(&self) -> &Block {
        &self.block
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Take all events emitted since the last call.
    pub fn take_events(&mut self) -> ArrayVec<RunEvent, EVENT_CAPACITY> {
        std::mem::take(&mut self.events)
    }

    fn push_event(&mut self, event: RunEvent) {
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Offer a move command.
    ///
    /// Only an accepted command costs a point; busy or post-run commands
    /// change nothing.
    pub fn on_command(&mut self, cmd: Command) -> CommandOutcome {
        if self.status.is_over() {
            return CommandOutcome::Ignored;
        }

        let outcome = self.block.begin_move(cmd);
        if outcome == CommandOutcome::Accepted {
            self.score += 1;
            self.push_event(RunEvent::Rolled(cmd));
            debug!(cmd = cmd.as_str(), score = self.score, "roll started");
        }
        outcome
    }

    /// Advance the simulation by one fixed step.
    ///
    /// `elapsed_ms` is accumulated for the host but does not scale roll or fall
    /// speed: every call moves the animation by the same amount.
    pub fn tick(&mut self, elapsed_ms: u32) -> Result<RunStatus> {
        if self.status.is_over() {
            return Ok(self.status);
        }

        self.tick_count += 1;
        self.elapsed_ms += u64::from(elapsed_ms);

        if self.block.is_falling() {
            if self.block.fall_step() {
                self.lose_life();
            }
        } else if self.block.advance() {
            let outcome = rules::settle(&mut self.level, &mut self.block)?;
            debug!(?outcome, footprint = ?self.block.footprint(), "settled");
            self.push_event(RunEvent::Settled(outcome));
            if outcome == Settle::Goal {
                self.complete_level()?;
            }
        }

        Ok(self.status)
    }

    fn lose_life(&mut self) {
        self.score = 0;
        self.lives -= 1;
        self.block.respawn(self.level.spawn);
        self.push_event(RunEvent::Died {
            lives_left: self.lives,
        });
        info!(lives = self.lives, level = self.level.number, "block fell");

        if self.lives <= LIVES_EXHAUSTED {
            self.status = RunStatus::Lost;
            self.push_event(RunEvent::Lost);
            info!("run lost");
        }
    }

    fn complete_level(&mut self) -> Result<()> {
        let finished = self.level.number;
        let next = self.level_index + 1;

        let Some(data) = self.campaign.get(next) else {
            self.status = RunStatus::Won;
            self.push_event(RunEvent::Won);
            info!(score = self.score, "run won");
            return Ok(());
        };

        self.level = Level::activate(data)?;
        self.level_index = next;
        self.block.respawn(self.level.spawn);
        self.push_event(RunEvent::LevelCompleted { level: finished });
        info!(finished, next = self.level.number, "level completed");
        Ok(())
    }

    pub fn snapshot_into(&self, out: &mut RunSnapshot) {
        out.write_tiles(&self.level.grid);
        out.block = self.block.pose();
        out.goal = self.level.goal;
        out.level = self.level.number;
        out.score = self.score;
        out.lives = self.lives;
        out.status = self.status;
        out.tick = self.tick_count;
    }

    pub fn snapshot(&self) -> RunSnapshot {
        let mut s = RunSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
