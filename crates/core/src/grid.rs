//! Grid module - the tile floor of one level
//!
//! The grid is a 20x10 floor where each cell is either a tile (passable) or a
//! hole. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (col, row) where col ranges 0..19 (left to right) and row
//! ranges 0..9 (top to bottom of the top-down view).

use crate::error::{EngineError, Result};
use crate::types::{CellKind, Coord, GRID_HEIGHT, GRID_WIDTH};

/// Total number of cells on the grid
const GRID_SIZE: usize = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

/// A single floor cell.
///
/// `kind` is purely visual; `passable` is what the rules read. A cell whose
/// kind is `Empty` is never passable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub passable: bool,
    pub kind: CellKind,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        passable: false,
        kind: CellKind::Empty,
    };

    pub const FLOOR: Cell = Cell {
        passable: true,
        kind: CellKind::Floor,
    };

    pub fn from_kind(kind: CellKind) -> Self {
        Self {
            passable: kind.is_passable(),
            kind,
        }
    }

    /// Flip between a hole and a plain floor tile.
    pub fn toggled(self) -> Self {
        if self.passable {
            Cell::EMPTY
        } else {
            Cell::FLOOR
        }
    }
}

/// The level floor - 20 columns x 10 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a grid with no tiles at all
    pub fn empty() -> Self {
        Self {
            cells: [Cell::EMPTY; GRID_SIZE],
        }
    }

    /// Build a grid from an authored table of tile codes.
    ///
    /// Unknown codes are treated as holes.
    pub fn from_codes(codes: &[[u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize]) -> Self {
        let mut grid = Self::empty();
        for (row, line) in codes.iter().enumerate() {
            for (col, &code) in line.iter().enumerate() {
                let kind = CellKind::from_code(code).unwrap_or(CellKind::Empty);
                grid.cells[row * GRID_WIDTH as usize + col] = Cell::from_kind(kind);
            }
        }
        grid
    }

    #[inline(always)]
    fn index(at: Coord) -> Option<usize> {
        if at.col < 0 || at.col >= GRID_WIDTH as i32 || at.row < 0 || at.row >= GRID_HEIGHT as i32
        {
            return None;
        }
        Some((at.row as usize) * (GRID_WIDTH as usize) + (at.col as usize))
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    pub fn in_bounds(&self, at: Coord) -> bool {
        Self::index(at).is_some()
    }

    /// Get cell at `at`, or None if off the grid
    pub fn get(&self, at: Coord) -> Option<Cell> {
        Self::index(at).map(|idx| self.cells[idx])
    }

    /// Whether a block resting on `at` is held up. Off-grid cells never are.
    pub fn is_supported(&self, at: Coord) -> bool {
        self.get(at).is_some_and(|cell| cell.passable)
    }

    pub fn set(&mut self, at: Coord, cell: Cell) -> Result<()> {
        let idx = Self::index(at).ok_or(EngineError::OutOfBoundsCell {
            col: at.col,
            row: at.row,
        })?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Knock out a tile permanently (for the rest of the level).
    pub fn remove(&mut self, at: Coord) -> Result<()> {
        self.set(at, Cell::EMPTY)
    }

    /// Toggle a cell between hole and floor, returning the new passability.
    pub fn toggle(&mut self, at: Coord) -> Result<bool> {
        let idx = Self::index(at).ok_or(EngineError::OutOfBoundsCell {
            col: at.col,
            row: at.row,
        })?;
        let next = self.cells[idx].toggled();
        self.cells[idx] = next;
        Ok(next.passable)
    }

    /// Iterate rows top to bottom as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(GRID_WIDTH as usize)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}
