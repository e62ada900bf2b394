use serde::Serialize;

use crate::block::{Block, BlockPose};
use crate::grid::{Cell, Grid};
use crate::types::{CellKind, Coord, RunStatus, GRID_HEIGHT, GRID_WIDTH, START_LIVES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TileSnapshot {
    pub passable: bool,
    pub kind: CellKind,
}

impl From<Cell> for TileSnapshot {
    fn from(value: Cell) -> Self {
        Self {
            passable: value.passable,
            kind: value.kind,
        }
    }
}

impl TileSnapshot {
    pub const EMPTY: TileSnapshot = TileSnapshot {
        passable: false,
        kind: CellKind::Empty,
    };
}

pub type TileGrid = [[TileSnapshot; GRID_WIDTH as usize]; GRID_HEIGHT as usize];

/// Read-only view of a run for renderers and HUDs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunSnapshot {
    pub tiles: TileGrid,
    pub block: BlockPose,
    pub goal: Coord,
    /// 1-based level number.
    pub level: u8,
    pub score: u32,
    pub lives: i32,
    pub status: RunStatus,
    pub tick: u64,
}

impl RunSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn write_tiles(&mut self, grid: &Grid) {
        for (row, cells) in grid.rows().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                self.tiles[row][col] = cell.into();
            }
        }
    }

    /// Tile at `at`, or None off the grid.
    pub fn tile(&self, at: Coord) -> Option<TileSnapshot> {
        if at.col < 0 || at.row < 0 {
            return None;
        }
        self.tiles
            .get(at.row as usize)
            .and_then(|row| row.get(at.col as usize))
            .copied()
    }

    pub fn playable(&self) -> bool {
        self.status == RunStatus::Playing
    }
}

impl Default for RunSnapshot {
    fn default() -> Self {
        Self {
            tiles: [[TileSnapshot::EMPTY; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            block: Block::new(Coord::new(0, 0)).pose(),
            goal: Coord::new(0, 0),
            level: 1,
            score: 0,
            lives: START_LIVES,
            status: RunStatus::Playing,
            tick: 0,
        }
    }
}
