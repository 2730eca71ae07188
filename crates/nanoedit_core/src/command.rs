//! Input commands and the state snapshot returned to the presentation layer.

use crate::stats::DocStats;
use std::path::PathBuf;

/// One logical input event delivered by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Insert text at the cursor.
    InsertText(String),
    /// Delete up to `n` characters before the cursor.
    DeleteBackward(usize),
    /// Delete up to `n` characters after the cursor.
    DeleteForward(usize),
    /// Move the cursor to an absolute char offset (clamped).
    MoveCursor(usize),
    Undo,
    Redo,
    /// Begin a search session, discarding cached results.
    StartSearch,
    /// Set the active query and jump to the first match after the cursor.
    SubmitSearchQuery(String),
    FindNext,
    FindPrev,
    /// Begin a replace session, discarding cached results and the current
    /// match.
    StartReplace,
    /// Replace the current match if still valid, then advance to the next.
    SubmitReplace {
        query: String,
        replacement: String,
    },
    Save,
    Exit,
}

/// User-visible outcome of handling a command.
///
/// These are notices for the presentation layer to display, not errors;
/// every one of them leaves the editor in a consistent, recoverable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Saved { path: PathBuf },
    SaveFailed { reason: String },
    Found { query: String },
    NotFound { query: String },
    Replaced { query: String, replacement: String },
    EmptyQuery,
    NothingToUndo,
    NothingToRedo,
}

/// Snapshot returned after every handled command: everything the
/// presentation layer needs to re-render without reaching into the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    /// Cursor as a char offset into the document.
    pub cursor: usize,
    /// 1-based line of the cursor.
    pub line: usize,
    /// 1-based column of the cursor.
    pub column: usize,
    /// Whether the document has unsaved changes.
    pub modified: bool,
    /// Throttled document statistics.
    pub stats: DocStats,
    /// Offset of the most recent search/replace match, if any.
    pub last_match: Option<usize>,
    /// Set by [`Command::Exit`]; the core takes no further action.
    pub should_exit: bool,
    /// Message for the user, when the command produced one.
    pub notice: Option<Notice>,
}
