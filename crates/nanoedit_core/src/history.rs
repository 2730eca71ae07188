//! Bounded undo/redo history with compact diff entries.

use chrono::{DateTime, Utc};
use similar::{ChangeTag, TextDiff};

/// One recorded document state in the history log.
///
/// Small documents are stored as full snapshots; documents above the diff
/// threshold are stored as line-based edit scripts relative to the previous
/// entry. Entries are immutable once appended.
#[derive(Debug, Clone)]
pub enum HistoryEntry {
    /// Complete document text.
    Full { text: String, at: DateTime<Utc> },
    /// Line-based edit script transforming the previous state into this one.
    Diff { script: EditScript, at: DateTime<Utc> },
}

/// A line-oriented edit script between two document states.
///
/// Applying the script to the exact text it was built from reproduces the
/// target text byte for byte. Line units follow `split_inclusive('\n')`,
/// matching the diff tokenizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditScript {
    ops: Vec<ScriptOp>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScriptOp {
    /// Copy the next `n` lines of the source text.
    Retain(usize),
    /// Drop the next `n` lines of the source text.
    Skip(usize),
    /// Append literal text.
    Emit(String),
}

impl EditScript {
    /// Build the edit script that rewrites `old` into `new`.
    pub fn between(old: &str, new: &str) -> Self {
        let diff = TextDiff::from_lines(old, new);
        let mut ops: Vec<ScriptOp> = Vec::new();
        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Equal => match ops.last_mut() {
                    Some(ScriptOp::Retain(n)) => *n += 1,
                    _ => ops.push(ScriptOp::Retain(1)),
                },
                ChangeTag::Delete => match ops.last_mut() {
                    Some(ScriptOp::Skip(n)) => *n += 1,
                    _ => ops.push(ScriptOp::Skip(1)),
                },
                ChangeTag::Insert => match ops.last_mut() {
                    Some(ScriptOp::Emit(text)) => text.push_str(change.value()),
                    _ => ops.push(ScriptOp::Emit(change.value().to_string())),
                },
            }
        }
        Self { ops }
    }

    /// Apply the script to the text it was built from.
    pub fn apply(&self, old: &str) -> String {
        let lines: Vec<&str> = old.split_inclusive('\n').collect();
        let mut index = 0;
        let mut out = String::with_capacity(old.len());
        for op in &self.ops {
            match op {
                ScriptOp::Retain(n) => {
                    let end = (index + n).min(lines.len());
                    for line in &lines[index..end] {
                        out.push_str(line);
                    }
                    index = end;
                }
                ScriptOp::Skip(n) => {
                    index = (index + n).min(lines.len());
                }
                ScriptOp::Emit(text) => out.push_str(text),
            }
        }
        out
    }
}

/// Ordered sequence of history entries plus a cursor into it.
///
/// Invariants: `cursor < entries.len()`, `entries.len() <= max_entries`,
/// and the oldest retained entry is always [`HistoryEntry::Full`] so every
/// entry can be materialized by replaying diffs forward from the nearest
/// preceding full snapshot.
#[derive(Debug)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    cursor: usize,
    max_entries: usize,
    diff_threshold: usize,
}

/// Exact character-count threshold check that avoids counting when the byte
/// length already rules it out.
fn exceeds(text: &str, threshold: usize) -> bool {
    text.len() > threshold && text.chars().count() > threshold
}

impl HistoryLog {
    /// Create a log seeded with the initial document state.
    pub fn new(initial: String, max_entries: usize, diff_threshold: usize) -> Self {
        Self {
            entries: vec![HistoryEntry::Full {
                text: initial,
                at: Utc::now(),
            }],
            cursor: 0,
            max_entries: max_entries.max(1),
            diff_threshold,
        }
    }

    /// Drop all history and reseed with a fresh initial state.
    pub fn reset(&mut self, initial: String) {
        self.entries = vec![HistoryEntry::Full {
            text: initial,
            at: Utc::now(),
        }];
        self.cursor = 0;
    }

    /// Record a buffer change.
    ///
    /// A no-op when `old == new`. Any forward (redo) history beyond the
    /// cursor is discarded before appending. The entry is stored as a diff
    /// when either side exceeds the diff threshold in characters, otherwise
    /// as a full snapshot. Exceeding the size cap evicts the oldest entry
    /// and shifts the cursor so it keeps addressing the same logical state.
    pub fn record(&mut self, old: &str, new: &str) {
        if old == new {
            return;
        }
        self.entries.truncate(self.cursor + 1);

        let at = Utc::now();
        let entry = if exceeds(old, self.diff_threshold) || exceeds(new, self.diff_threshold) {
            HistoryEntry::Diff {
                script: EditScript::between(old, new),
                at,
            }
        } else {
            HistoryEntry::Full {
                text: new.to_string(),
                at,
            }
        };
        self.entries.push(entry);
        self.cursor += 1;

        if self.entries.len() > self.max_entries {
            self.evict_oldest();
        }
    }

    /// Step back one entry.
    ///
    /// # Returns
    /// The exact prior document text, or `None` when already at the oldest
    /// entry.
    pub fn undo(&mut self) -> Option<String> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.materialize(self.cursor))
    }

    /// Step forward one entry.
    ///
    /// # Returns
    /// The exact next document text, or `None` when already at the tail.
    pub fn redo(&mut self) -> Option<String> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.materialize(self.cursor))
    }

    /// Whether the cursor sits at the most recent entry.
    pub fn at_tail(&self) -> bool {
        self.cursor + 1 == self.entries.len()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: the log keeps at least the seed entry.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Current cursor index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Reconstruct the document text at `index` by replaying diffs forward
    /// from the nearest preceding full snapshot.
    fn materialize(&self, index: usize) -> String {
        let anchor = (0..=index)
            .rev()
            .find(|&k| matches!(self.entries[k], HistoryEntry::Full { .. }))
            .unwrap_or(0);
        let mut text = match &self.entries[anchor] {
            HistoryEntry::Full { text, .. } => text.clone(),
            HistoryEntry::Diff { .. } => String::new(),
        };
        for entry in &self.entries[anchor + 1..=index] {
            if let HistoryEntry::Diff { script, .. } = entry {
                text = script.apply(&text);
            }
        }
        text
    }

    /// Evict the oldest entry, first converting its successor to a full
    /// snapshot when needed so the head anchor invariant holds.
    fn evict_oldest(&mut self) {
        let diff_at = match &self.entries[1] {
            HistoryEntry::Diff { at, .. } => Some(*at),
            HistoryEntry::Full { .. } => None,
        };
        if let Some(at) = diff_at {
            let text = self.materialize(1);
            self.entries[1] = HistoryEntry::Full { text, at };
        }
        self.entries.remove(0);
        self.cursor = self.cursor.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{EditScript, HistoryEntry, HistoryLog};

    #[test]
    fn edit_script_rewrites_old_into_new_exactly() {
        let cases = [
            ("", "hello"),
            ("hello", ""),
            ("a\nb\nc\n", "a\nB\nc\n"),
            ("one\ntwo", "one\ntwo\nthree"),
            ("x\ny\nz", "z\ny\nx"),
            ("no trailing newline", "no trailing newline\n"),
        ];
        for (old, new) in cases {
            let script = EditScript::between(old, new);
            assert_eq!(script.apply(old), new, "old={:?} new={:?}", old, new);
        }
    }

    #[test]
    fn undo_redo_roundtrip_restores_every_state() {
        let states = ["", "a", "ab", "ab\ncd", "ab\ncd\nef"];
        let mut log = HistoryLog::new(states[0].to_string(), 200, 5_000);
        for pair in states.windows(2) {
            log.record(pair[0], pair[1]);
        }

        for expected in states.iter().rev().skip(1) {
            assert_eq!(log.undo().expect("undo"), *expected);
        }
        assert!(log.undo().is_none());

        for expected in states.iter().skip(1) {
            assert_eq!(log.redo().expect("redo"), *expected);
        }
        assert!(log.redo().is_none());
    }

    #[test]
    fn large_documents_are_stored_as_diffs_and_reconstruct_exactly() {
        let base: String = (0..400).map(|i| format!("line number {}\n", i)).collect();
        assert!(base.len() > 64);

        // Threshold far below the document size forces diff entries.
        let mut log = HistoryLog::new(base.clone(), 200, 64);
        let edited = base.replacen("line number 7", "LINE NUMBER 7", 1);
        let appended = format!("{}trailer\n", edited);
        log.record(&base, &edited);
        log.record(&edited, &appended);

        assert!(matches!(
            log.entries[1],
            HistoryEntry::Diff { .. }
        ));
        assert_eq!(log.undo().expect("undo to edited"), edited);
        assert_eq!(log.undo().expect("undo to base"), base);
        assert_eq!(log.redo().expect("redo to edited"), edited);
        assert_eq!(log.redo().expect("redo to appended"), appended);
    }

    #[test]
    fn a_fresh_edit_discards_the_redo_tail() {
        let mut log = HistoryLog::new("a".to_string(), 200, 5_000);
        log.record("a", "ab");
        log.record("ab", "abc");
        assert_eq!(log.undo().expect("undo"), "ab");

        log.record("ab", "abX");
        assert!(log.redo().is_none());
        assert_eq!(log.undo().expect("undo"), "ab");
        assert_eq!(log.redo().expect("redo"), "abX");
    }

    #[test]
    fn eviction_caps_the_log_and_keeps_the_cursor_valid() {
        let mut log = HistoryLog::new("0".to_string(), 5, 5_000);
        let mut prev = "0".to_string();
        for i in 1..20 {
            let next = format!("{}{}", prev, i);
            log.record(&prev, &next);
            prev = next;
            assert!(log.len() <= 5);
            assert!(log.cursor() < log.len());
        }

        // Oldest retained state is still reachable after repeated eviction.
        let mut last = None;
        while let Some(text) = log.undo() {
            last = Some(text);
        }
        assert!(last.expect("some undo state").len() < prev.len());
    }

    #[test]
    fn eviction_preserves_reconstruction_through_diff_entries() {
        let base: String = (0..200).map(|i| format!("row {}\n", i)).collect();
        let mut log = HistoryLog::new(base.clone(), 3, 16);
        let mut states = vec![base.clone()];
        let mut prev = base;
        for i in 0..6 {
            let next = format!("{}extra {}\n", prev, i);
            log.record(&prev, &next);
            states.push(next.clone());
            prev = next;
        }

        // Walk all the way back; every materialized state must match the
        // recorded sequence suffix that survived eviction.
        let mut walked = vec![states.last().expect("tail").clone()];
        while let Some(text) = log.undo() {
            walked.push(text);
        }
        walked.reverse();
        assert_eq!(walked.as_slice(), &states[states.len() - walked.len()..]);
    }

    #[test]
    fn identical_states_are_not_recorded() {
        let mut log = HistoryLog::new("same".to_string(), 200, 5_000);
        log.record("same", "same");
        assert_eq!(log.len(), 1);
        assert!(log.at_tail());
    }
}
