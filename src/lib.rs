//! Bloxorz-style block puzzle (workspace facade crate).
//!
//! Re-exports the member crates under `bloxorz::{core,input,term,types}` so
//! the binary, integration tests and benches share one import path.

pub mod config;

pub use bloxorz_core as core;
pub use bloxorz_input as input;
pub use bloxorz_term as term;
pub use bloxorz_types as types;

pub use config::RunnerConfig;
