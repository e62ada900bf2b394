//! Engine error taxonomy.
//!
//! Falling, dying and run termination are gameplay outcomes and never show up
//! here. These variants are internal-consistency failures: a correctly authored
//! level never produces them.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A grid mutation addressed a cell outside the grid.
    #[error("cell ({col}, {row}) is outside the grid")]
    OutOfBoundsCell { col: i32, row: i32 },

    /// A level registry references a coordinate the grid does not contain.
    #[error("level {level}: {what} at ({col}, {row}) is outside the grid")]
    LevelDataMissing {
        level: u8,
        what: &'static str,
        col: i32,
        row: i32,
    },

    #[error("campaign has no levels")]
    EmptyCampaign,
}

pub type Result<T> = std::result::Result<T, EngineError>;
