//! Editing core for the nanoedit terminal editor.
//!
//! Owns the document buffer, undo/redo history, search/replace state, and
//! safe persistence. The terminal presentation layer lives elsewhere and
//! drives this crate exclusively through [`EditorCore::handle`].

/// Document buffer and cursor tracking.
pub mod buffer;
/// Input commands and the render-state snapshot.
pub mod command;
/// Configuration loading and defaults.
pub mod config;
/// Shared constants.
pub mod constants;
/// Editor orchestration and command dispatch.
pub mod editor;
/// Application error types.
pub mod error;
/// File metadata diagnostics.
pub mod fileinfo;
/// Bounded undo/redo history.
pub mod history;
/// Atomic save and path safety checks.
pub mod persist;
/// Guarded in-place replacement.
pub mod replace;
/// Cached literal search.
pub mod search;
/// Throttled document statistics.
pub mod stats;

pub use buffer::TextBuffer;
pub use command::{Command, EditorState, Notice};
pub use config::Config;
pub use constants::*;
pub use editor::EditorCore;
pub use error::EditorError;
pub use fileinfo::{describe, ContentEncoding, FileReport};
pub use stats::DocStats;
