//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`]s. The engine
//! itself rejects commands while the block is busy, so there is no repeat or
//! buffering logic here.

pub mod map;

pub use bloxorz_types as types;

pub use map::{handle_key_event, should_quit};
