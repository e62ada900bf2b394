//! Core simulation - pure, deterministic, and testable
//!
//! Everything that decides what happens to the block lives here. The crate has
//! no terminal, input or file I/O, so a host can drive it headless:
//!
//! - **Deterministic**: the same command/tick sequence always yields the same run
//! - **Fixed step**: roll and fall speed are per tick, not per millisecond
//! - **Small**: the hot path (`tick`) does not allocate
//!
//! # Module Structure
//!
//! - [`grid`]: 20x10 cell grid, support queries and bridge toggling
//! - [`levels`]: authored level tables and their activation
//! - [`block`]: footprint, roll transitions and the roll/fall animation
//! - [`rules`]: what happens when a roll comes to rest
//! - [`run_state`]: score, lives, level progression and the event queue
//! - [`snapshot`]: copyable view of a run for renderers
//!
//! # Example
//!
//! ```
//! use bloxorz_core::RunState;
//! use bloxorz_types::{Command, CommandOutcome, Orientation, TICK_MS};
//!
//! let mut run = RunState::new().unwrap();
//! assert_eq!(run.on_command(Command::Left), CommandOutcome::Accepted);
//! for _ in 0..8 {
//!     run.tick(TICK_MS).unwrap();
//! }
//! assert_eq!(run.block().orientation(), Orientation::LyingAlongX);
//! assert_eq!(run.score(), 1);
//! ```

pub mod block;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod levels;
pub mod rules;
pub mod run_state;
pub mod snapshot;

pub use bloxorz_types as types;

pub use block::{Block, BlockPose, Footprint, RollPose};
pub use error::{EngineError, Result};
pub use geometry::Vec3;
pub use grid::{Cell, Grid};
pub use levels::{builtin_campaign, Level, LevelData};
pub use rules::Settle;
pub use run_state::{RunEvent, RunState};
pub use snapshot::{RunSnapshot, TileSnapshot};
