//! Authored level tables and level activation.
//!
//! `LevelData` is the static, as-authored description of a level. Activating it
//! produces a [`Level`]: a fresh [`Grid`] plus the mutable special-cell
//! registries. A level is activated once on entry and thrown away on exit, so
//! fragile tiles and bridges never leak from one level into the next.

use crate::error::{EngineError, Result};
use crate::grid::Grid;
use crate::types::{Coord, GRID_HEIGHT, GRID_WIDTH};

pub type TileTable = [[u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize];

/// Static description of one level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelData {
    /// 1-based level number.
    pub number: u8,
    pub tiles: TileTable,
    pub spawn: Coord,
    pub goal: Coord,
    pub fragile: Vec<Coord>,
    pub teleporters: Option<(Coord, Coord)>,
    pub trigger: Option<Coord>,
    pub bridge: Vec<Coord>,
}

const LEVEL_ONE_TILES: TileTable = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 1, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 1, 1, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1, 5, 1, 1, 1, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
];

const LEVEL_TWO_TILES: TileTable = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [1, 4, 1, 0, 0, 1, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0],
    [1, 1, 1, 0, 0, 1, 1, 1, 1, 4, 0, 0, 1, 5, 1, 1, 0, 0, 0, 0],
    [1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 0, 0, 1, 1, 2, 1, 0, 0, 0, 0],
    [3, 1, 1, 0, 0, 1, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
];

impl LevelData {
    pub fn level_one() -> Self {
        Self {
            number: 1,
            tiles: LEVEL_ONE_TILES,
            spawn: Coord::new(7, 3),
            goal: Coord::new(15, 6),
            fragile: vec![Coord::new(10, 3)],
            teleporters: None,
            trigger: Some(Coord::new(8, 4)),
            bridge: vec![Coord::new(12, 4), Coord::new(13, 4)],
        }
    }

    pub fn level_two() -> Self {
        Self {
            number: 2,
            tiles: LEVEL_TWO_TILES,
            spawn: Coord::new(7, 3),
            goal: Coord::new(13, 3),
            fragile: vec![Coord::new(14, 4)],
            teleporters: Some((Coord::new(9, 3), Coord::new(1, 2))),
            trigger: Some(Coord::new(0, 5)),
            bridge: vec![Coord::new(10, 3), Coord::new(11, 3)],
        }
    }
}

/// The built-in two-level campaign.
pub fn builtin_campaign() -> Vec<LevelData> {
    vec![LevelData::level_one(), LevelData::level_two()]
}

/// An activated level: live grid plus special-cell registries.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub number: u8,
    pub grid: Grid,
    pub spawn: Coord,
    pub goal: Coord,
    /// Fragile tiles not yet broken.
    pub fragile: Vec<Coord>,
    pub teleporters: Option<(Coord, Coord)>,
    pub trigger: Option<Coord>,
    pub bridge: Vec<Coord>,
}

impl Level {
    /// Build the live level, checking every registry coordinate is on the grid.
    pub fn activate(data: &LevelData) -> Result<Self> {
        let grid = Grid::from_codes(&data.tiles);

        let check = |what: &'static str, at: Coord| -> Result<()> {
            if grid.in_bounds(at) {
                Ok(())
            } else {
                Err(EngineError::LevelDataMissing {
                    level: data.number,
                    what,
                    col: at.col,
                    row: at.row,
                })
            }
        };

        check("spawn", data.spawn)?;
        check("goal", data.goal)?;
        for &at in &data.fragile {
            check("fragile tile", at)?;
        }
        if let Some((a, b)) = data.teleporters {
            check("teleporter", a)?;
            check("teleporter", b)?;
        }
        if let Some(at) = data.trigger {
            check("trigger", at)?;
        }
        for &at in &data.bridge {
            check("bridge cell", at)?;
        }

        Ok(Self {
            number: data.number,
            grid,
            spawn: data.spawn,
            goal: data.goal,
            fragile: data.fragile.clone(),
            teleporters: data.teleporters,
            trigger: data.trigger,
            bridge: data.bridge.clone(),
        })
    }

    /// The other end of a teleporter pair, if `at` is one of the pads.
    pub fn teleport_partner(&self, at: Coord) -> Option<Coord> {
        let (a, b) = self.teleporters?;
        if at == a {
            Some(b)
        } else if at == b {
            Some(a)
        } else {
            None
        }
    }

    pub fn is_fragile(&self, at: Coord) -> bool {
        self.fragile.contains(&at)
    }
}
