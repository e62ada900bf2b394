//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no game logic, so they can be shared by the
//! engine, the input mapper and the terminal renderer alike.
//!
//! # Grid Dimensions
//!
//! Every level is authored on the same floor:
//!
//! - **Width**: 20 columns (indexed 0-19)
//! - **Height**: 10 rows (indexed 0-9)
//!
//! Columns grow to the right, rows grow "down" (towards the viewer in the
//! top-down view). `Up` moves towards row 0.
//!
//! # Simulation Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Host frame interval (~60 FPS) |
//! | `ROLL_SPEED_DEG` | 11 | Degrees rotated per tick while rolling |
//! | `ROLL_TARGET_DEG` | 88 | Magnitude of the final roll angle |
//! | `FALL_STEP` | 0.2 | World units dropped per tick while falling |
//! | `DEATH_Y` | -8.2 | Centre height below which a falling block dies |
//! | `START_LIVES` | 3 | Lives at the start of a run |
//! | `LIVES_EXHAUSTED` | -1 | Lives value that ends the run |
//!
//! Rolls are stepped per tick, not per millisecond: a roll always takes
//! `ROLL_TARGET_DEG / ROLL_SPEED_DEG` = 8 ticks regardless of frame time.
//!
//! # Examples
//!
//! ```
//! use bloxorz_types::{Command, Coord, Orientation, GRID_WIDTH, GRID_HEIGHT};
//!
//! let cmd = Command::from_str("left").unwrap();
//! assert_eq!(cmd, Command::Left);
//! assert_eq!(Coord::new(7, 3).step(cmd), Coord::new(6, 3));
//!
//! assert_eq!(Orientation::Standing.scale(), [1, 2, 1]);
//! assert_eq!(GRID_WIDTH, 20);
//! assert_eq!(GRID_HEIGHT, 10);
//! ```

use serde::Serialize;

/// Grid width in cells (20 columns)
pub const GRID_WIDTH: u8 = 20;

/// Grid height in cells (10 rows)
pub const GRID_HEIGHT: u8 = 10;

/// Host frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Degrees added to the roll angle on every tick.
pub const ROLL_SPEED_DEG: i32 = 11;

/// Final roll angle magnitude. The block is never drawn fully at 90°;
/// the footprint snaps on the tick this is reached.
pub const ROLL_TARGET_DEG: i32 = 88;

/// Vertical distance dropped per tick while falling.
pub const FALL_STEP: f32 = 0.2;

/// A falling block whose centre is at or below this height is dead.
pub const DEATH_Y: f32 = -8.2;

/// Lives at the start of a run.
pub const START_LIVES: i32 = 3;

/// Losing a life that leaves this many ends the run.
pub const LIVES_EXHAUSTED: i32 = -1;


/// A grid coordinate.
///
/// Signed so that cells rolled off the edge of the grid remain representable;
/// such cells are simply unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Coord {
    pub col: i32,
    pub row: i32,
}

impl Coord {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub const fn offset(self, dc: i32, dr: i32) -> Self {
        Self {
            col: self.col + dc,
            row: self.row + dr,
        }
    }

    /// One cell in the direction of `cmd`.
    pub fn step(self, cmd: Command) -> Self {
        let (dc, dr) = cmd.delta();
        self.offset(dc, dr)
    }

    /// Difference `self - other` as `(dcol, drow)`.
    pub fn delta_from(self, other: Coord) -> (i32, i32) {
        (self.col - other.col, self.row - other.row)
    }
}

/// Directional move commands
///
/// These are the only inputs the simulation consumes besides the tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Command {
    /// Roll towards column 0
    Left,
    /// Roll towards the last column
    Right,
    /// Roll towards row 0
    Up,
    /// Roll towards the last row
    Down,
}

impl Command {
    pub const ALL: [Command; 4] = [Command::Left, Command::Right, Command::Up, Command::Down];

    /// Signed `(dcol, drow)` unit step.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Command::Left => (-1, 0),
            Command::Right => (1, 0),
            Command::Up => (0, -1),
            Command::Down => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Command::Left => Command::Right,
            Command::Right => Command::Left,
            Command::Up => Command::Down,
            Command::Down => Command::Up,
        }
    }

    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use bloxorz_types::Command;
    ///
    /// assert_eq!(Command::from_str("left"), Some(Command::Left));
    /// assert_eq!(Command::from_str("Down"), Some(Command::Down));
    /// assert_eq!(Command::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Command::Left),
            "right" => Some(Command::Right),
            "up" => Some(Command::Up),
            "down" => Some(Command::Down),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Left => "left",
            Command::Right => "right",
            Command::Up => "up",
            Command::Down => "down",
        }
    }
}

/// Block orientation
///
/// - **Standing**: upright on one cell
/// - **LyingAlongX**: on its side across two cells of the same row
/// - **LyingAlongZ**: on its side across two cells of the same column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Orientation {
    Standing,
    LyingAlongX,
    LyingAlongZ,
}

impl Orientation {
    /// Offset from the primary cell to the secondary cell, if the block lies.
    pub fn secondary_offset(&self) -> Option<(i32, i32)> {
        match self {
            Orientation::Standing => None,
            Orientation::LyingAlongX => Some((1, 0)),
            Orientation::LyingAlongZ => Some((0, 1)),
        }
    }

    /// Bounding scale `[x, y, z]` of the block in this orientation.
    pub fn scale(&self) -> [u8; 3] {
        match self {
            Orientation::Standing => [1, 2, 1],
            Orientation::LyingAlongX => [2, 1, 1],
            Orientation::LyingAlongZ => [1, 1, 2],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Standing => "standing",
            Orientation::LyingAlongX => "lying_x",
            Orientation::LyingAlongZ => "lying_z",
        }
    }
}

/// Visual tile kind
///
/// Only `Empty` carries gameplay meaning (it is never passable). The other
/// kinds exist so a renderer can colour special tiles; the rules themselves
/// work off the level registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CellKind {
    Empty,
    Floor,
    Fragile,
    Trigger,
    Teleporter,
    Goal,
}

impl CellKind {
    /// Decode an authored tile code (0-5).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(CellKind::Empty),
            1 => Some(CellKind::Floor),
            2 => Some(CellKind::Fragile),
            3 => Some(CellKind::Trigger),
            4 => Some(CellKind::Teleporter),
            5 => Some(CellKind::Goal),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            CellKind::Empty => 0,
            CellKind::Floor => 1,
            CellKind::Fragile => 2,
            CellKind::Trigger => 3,
            CellKind::Teleporter => 4,
            CellKind::Goal => 5,
        }
    }

    pub fn is_passable(&self) -> bool {
        !matches!(self, CellKind::Empty)
    }
}

/// Overall run status, reported to the host every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RunStatus {
    Playing,
    /// Goal of the last level reached.
    Won,
    /// Lives exhausted.
    Lost,
}

impl RunStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, RunStatus::Playing)
    }
}

/// Result of offering a command to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CommandOutcome {
    /// A roll started; the score was incremented.
    Accepted,
    /// A roll or fall is in flight; the command was dropped.
    Busy,
    /// The run has ended.
    Ignored,
}
