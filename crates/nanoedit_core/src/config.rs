//! Configuration loading from environment variables.

use crate::constants::{
    DEFAULT_AUTOSAVE_INTERVAL_SECS, DEFAULT_HISTORY_DIFF_THRESHOLD, DEFAULT_MAX_FILE_SIZE,
    DEFAULT_MAX_HISTORY_SIZE,
};
use serde::Deserialize;
use std::env;

/// Runtime limits for the editing core.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Maximum document size, in characters, accepted for editing.
    pub max_file_size: usize,
    /// Maximum number of undo/redo history entries retained.
    pub max_history_size: usize,
    /// Document length above which history switches to diff entries.
    pub history_diff_threshold: usize,
    /// Seconds between timer-driven autosave attempts.
    pub autosave_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_history_size: DEFAULT_MAX_HISTORY_SIZE,
            history_diff_threshold: DEFAULT_HISTORY_DIFF_THRESHOLD,
            autosave_interval_secs: DEFAULT_AUTOSAVE_INTERVAL_SECS,
        }
    }
}

/// Parse a numeric environment variable, falling back on missing or
/// unparseable values.
fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self {
            max_file_size: env_parse("NANOEDIT_MAX_FILE_SIZE", DEFAULT_MAX_FILE_SIZE),
            max_history_size: env_parse("NANOEDIT_MAX_HISTORY", DEFAULT_MAX_HISTORY_SIZE),
            history_diff_threshold: env_parse(
                "NANOEDIT_DIFF_THRESHOLD",
                DEFAULT_HISTORY_DIFF_THRESHOLD,
            ),
            autosave_interval_secs: env_parse(
                "NANOEDIT_AUTOSAVE_SECS",
                DEFAULT_AUTOSAVE_INTERVAL_SECS,
            ),
        }
    }
}
