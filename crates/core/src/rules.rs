//! Settle-time rule evaluation.
//!
//! Runs once, synchronously, on the tick a roll commits. Checks are applied in
//! a fixed order and the first one that matches decides the outcome:
//!
//! 1. support: a standing block needs its cell, a lying block needs either cell
//! 2. goal (standing only)
//! 3. fragile tile (standing only): the tile breaks and the block drops
//! 4. teleporter pad (standing only, guarded against immediate re-entry)
//! 5. trigger (any footprint cell): toggles every bridge cell
//!
//! Level switching and life bookkeeping belong to the run controller; this
//! module only reports what happened.

use serde::Serialize;
use tracing::debug;

use crate::block::{Block, Footprint};
use crate::error::Result;
use crate::grid::Grid;
use crate::levels::Level;
use crate::types::{Coord, Orientation};

/// What a settle decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Settle {
    /// Nothing special; the block rests where it landed.
    Rested,
    /// No support under the footprint. The block is now falling.
    Unsupported,
    /// Standing on the goal. The controller advances the level or ends the run.
    Goal,
    /// A fragile tile broke under the block. The block is now falling.
    FragileBroke(Coord),
    Teleported { from: Coord, to: Coord },
    /// The trigger was occupied; bridge cells were flipped.
    BridgeToggled(Coord),
}

/// Whether the footprint is held up by the grid.
///
/// A lying block survives with one cell overhanging; a standing block needs
/// its only cell.
pub fn is_supported(grid: &Grid, footprint: &Footprint) -> bool {
    footprint.cells().iter().any(|&at| grid.is_supported(at))
}

/// Apply the settle rules to a block that just committed a roll.
pub fn settle(level: &mut Level, block: &mut Block) -> Result<Settle> {
    let footprint = block.footprint();

    if !is_supported(&level.grid, &footprint) {
        block.start_falling();
        debug!(?footprint, "block unsupported");
        return Ok(Settle::Unsupported);
    }

    if footprint.orientation == Orientation::Standing {
        let at = footprint.primary;

        if at == level.goal {
            return Ok(Settle::Goal);
        }

        if let Some(idx) = level.fragile.iter().position(|&f| f == at) {
            level.fragile.swap_remove(idx);
            level.grid.remove(at)?;
            block.start_falling();
            debug!(?at, "fragile tile broke");
            return Ok(Settle::FragileBroke(at));
        }

        if !block.teleport_guard() {
            if let Some(to) = level.teleport_partner(at) {
                block.teleport_to(to);
                debug!(from = ?at, ?to, "teleported");
                return Ok(Settle::Teleported { from: at, to });
            }
        }
    }

    if let Some(trigger) = level.trigger {
        if footprint.contains(trigger) {
            for &cell in &level.bridge {
                level.grid.toggle(cell)?;
            }
            debug!(?trigger, cells = level.bridge.len(), "bridge toggled");
            return Ok(Settle::BridgeToggled(trigger));
        }
    }

    Ok(Settle::Rested)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LevelData;
    use crate::types::{Command, GRID_HEIGHT, GRID_WIDTH};

    /// A small test level: a floor strip on row 3 from column 2 to 12.
    fn strip_level() -> LevelData {
        let mut tiles = [[0u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize];
        for col in 2..=12 {
            tiles[3][col] = 1;
        }
        tiles[3][12] = 5;
        tiles[3][4] = 2;
        tiles[3][10] = 3;
        tiles[3][2] = 4;
        tiles[3][8] = 4;
        LevelData {
            number: 1,
            tiles,
            spawn: Coord::new(6, 3),
            goal: Coord::new(12, 3),
            fragile: vec![Coord::new(4, 3)],
            teleporters: Some((Coord::new(2, 3), Coord::new(8, 3))),
            trigger: Some(Coord::new(10, 3)),
            bridge: vec![Coord::new(10, 4), Coord::new(11, 4)],
        }
    }

    fn standing_at(at: Coord) -> Block {
        Block::new(at)
    }

    #[test]
    fn standing_on_hole_falls() {
        let mut level = Level::activate(&strip_level()).unwrap();
        let mut block = standing_at(Coord::new(6, 5));
        assert_eq!(settle(&mut level, &mut block), Ok(Settle::Unsupported));
        assert!(block.is_falling());
    }

    #[test]
    fn lying_block_survives_with_one_supported_cell() {
        let mut level = Level::activate(&strip_level()).unwrap();
        // Standing at (6,4) is off the strip; roll it up so it lies on rows 2..3.
        let mut block = standing_at(Coord::new(6, 4));
        block.begin_move(Command::Up);
        while !block.advance() {}
        assert_eq!(block.cells().as_slice(), &[Coord::new(6, 2), Coord::new(6, 3)]);
        assert_eq!(settle(&mut level, &mut block), Ok(Settle::Rested));
        assert!(!block.is_falling());
    }

    #[test]
    fn lying_block_with_both_cells_off_falls() {
        let mut level = Level::activate(&strip_level()).unwrap();
        let mut block = standing_at(Coord::new(6, 6));
        block.begin_move(Command::Down);
        while !block.advance() {}
        assert_eq!(settle(&mut level, &mut block), Ok(Settle::Unsupported));
        assert!(block.is_falling());
    }

    #[test]
    fn goal_needs_standing() {
        let mut level = Level::activate(&strip_level()).unwrap();
        let mut block = standing_at(Coord::new(12, 3));
        assert_eq!(settle(&mut level, &mut block), Ok(Settle::Goal));

        // Lying across the goal does not count.
        let mut lying = standing_at(Coord::new(10, 3));
        lying.begin_move(Command::Right);
        while !lying.advance() {}
        assert_eq!(lying.cells().as_slice(), &[Coord::new(11, 3), Coord::new(12, 3)]);
        assert_eq!(settle(&mut level, &mut lying), Ok(Settle::Rested));
    }

    #[test]
    fn fragile_breaks_once() {
        let mut level = Level::activate(&strip_level()).unwrap();
        let at = Coord::new(4, 3);

        let mut block = standing_at(at);
        assert_eq!(settle(&mut level, &mut block), Ok(Settle::FragileBroke(at)));
        assert!(block.is_falling());
        assert!(!level.grid.is_supported(at));
        assert!(!level.is_fragile(at));

        let mut again = standing_at(at);
        assert_eq!(settle(&mut level, &mut again), Ok(Settle::Unsupported));
    }

    #[test]
    fn lying_over_fragile_does_not_break_it() {
        let mut level = Level::activate(&strip_level()).unwrap();
        let mut block = standing_at(Coord::new(6, 3));
        block.begin_move(Command::Left);
        while !block.advance() {}
        assert_eq!(block.cells().as_slice(), &[Coord::new(4, 3), Coord::new(5, 3)]);
        assert_eq!(settle(&mut level, &mut block), Ok(Settle::Rested));
        assert!(level.is_fragile(Coord::new(4, 3)));
    }

    #[test]
    fn teleporter_moves_block_and_guard_blocks_bounce() {
        let mut level = Level::activate(&strip_level()).unwrap();
        let mut block = standing_at(Coord::new(2, 3));
        assert_eq!(
            settle(&mut level, &mut block),
            Ok(Settle::Teleported {
                from: Coord::new(2, 3),
                to: Coord::new(8, 3)
            })
        );
        assert_eq!(block.primary(), Coord::new(8, 3));

        // Re-settling on the paired pad without rolling does nothing.
        assert_eq!(settle(&mut level, &mut block), Ok(Settle::Rested));
        assert_eq!(block.primary(), Coord::new(8, 3));
    }

    #[test]
    fn trigger_toggles_bridge_from_either_cell() {
        let mut level = Level::activate(&strip_level()).unwrap();
        let bridge = level.bridge.clone();
        let before: Vec<bool> = bridge.iter().map(|&c| level.grid.is_supported(c)).collect();

        let mut block = standing_at(Coord::new(10, 3));
        assert_eq!(
            settle(&mut level, &mut block),
            Ok(Settle::BridgeToggled(Coord::new(10, 3)))
        );
        for (i, &c) in bridge.iter().enumerate() {
            assert_ne!(level.grid.is_supported(c), before[i]);
        }

        // Lying with its secondary cell on the trigger flips them back.
        let mut lying = standing_at(Coord::new(8, 3));
        lying.begin_move(Command::Right);
        while !lying.advance() {}
        assert_eq!(lying.secondary(), Some(Coord::new(10, 3)));
        assert_eq!(
            settle(&mut level, &mut lying),
            Ok(Settle::BridgeToggled(Coord::new(10, 3)))
        );
        for (i, &c) in bridge.iter().enumerate() {
            assert_eq!(level.grid.is_supported(c), before[i]);
        }
    }

    #[test]
    fn plain_floor_rests() {
        let mut level = Level::activate(&strip_level()).unwrap();
        let mut block = standing_at(Coord::new(6, 3));
        assert_eq!(settle(&mut level, &mut block), Ok(Settle::Rested));
    }
}
