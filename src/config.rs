//! Runner configuration from environment variables.
//!
//! - `BLOXORZ_TICK_MS`: frame interval in milliseconds (default: 16, must be > 0)
//! - `BLOXORZ_LOG_PATH`: write `tracing` output to this file (default: no logging)
//! - `RUST_LOG`: log filter, read by the subscriber itself

use std::path::PathBuf;

use crate::types::TICK_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub tick_ms: u32,
    pub log_path: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            log_path: None,
        }
    }
}

impl RunnerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let tick_ms = lookup("BLOXORZ_TICK_MS")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|&ms| ms > 0)
            .unwrap_or(TICK_MS);

        let log_path = lookup("BLOXORZ_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Self { tick_ms, log_path }
    }
}
