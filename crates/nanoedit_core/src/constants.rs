//! Shared constants used across nanoedit crates.

use std::time::Duration;

/// Default ceiling on editable document size, in characters.
pub const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Default maximum number of retained history entries.
pub const DEFAULT_MAX_HISTORY_SIZE: usize = 200;

/// Document length above which history entries are stored as line diffs
/// instead of full snapshots.
pub const DEFAULT_HISTORY_DIFF_THRESHOLD: usize = 5_000;

/// Default autosave interval in seconds.
pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 300;

/// Minimum interval between document statistics recomputations.
pub const STATS_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Bounded number of cached search queries (FIFO eviction).
pub const SEARCH_CACHE_CAPACITY: usize = 20;

/// Suffix appended to the scratch file written during an atomic save.
pub const SAVE_TEMP_SUFFIX: &str = ".ned_tmp";

/// Suffix appended to the pre-save backup copy of the destination.
pub const SAVE_BACKUP_SUFFIX: &str = ".ned_bak";
