//! Terminal rendering for the block puzzle.
//!
//! Renders into a plain framebuffer rather than through a widget toolkit, so
//! each grid cell can be drawn two characters wide and frames can be diffed.
//! `core` stays free of any terminal code.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use bloxorz_core as core;
pub use bloxorz_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{tile_glyph, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
