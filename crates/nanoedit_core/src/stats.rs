//! Throttled document statistics.

use crate::constants::STATS_REFRESH_INTERVAL;
use serde::Serialize;
use std::time::Instant;

/// Line, word, and character counts for a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocStats {
    pub lines: usize,
    pub words: usize,
    pub chars: usize,
}

/// Count lines, whitespace-separated words, and characters.
///
/// An empty document reports zero lines; otherwise lines are newline count
/// plus one.
pub fn compute(text: &str) -> DocStats {
    DocStats {
        lines: if text.is_empty() {
            0
        } else {
            text.matches('\n').count() + 1
        },
        words: text.split_whitespace().count(),
        chars: text.chars().count(),
    }
}

/// Caches [`DocStats`] and recomputes at most once per refresh interval,
/// bounding the cost on large documents regardless of edit frequency.
#[derive(Debug, Default)]
pub struct StatsTracker {
    current: DocStats,
    refreshed_at: Option<Instant>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stats, recomputed only when the refresh interval elapsed.
    pub fn get(&mut self, text: &str) -> DocStats {
        let due = self
            .refreshed_at
            .map_or(true, |at| at.elapsed() > STATS_REFRESH_INTERVAL);
        if due || text.is_empty() {
            self.current = compute(text);
            self.refreshed_at = Some(Instant::now());
        }
        self.current
    }

    /// Force the next [`get`](Self::get) to recompute (used after a
    /// wholesale document replacement).
    pub fn invalidate(&mut self) {
        self.refreshed_at = None;
    }
}
