//! Root crate facade for the nanoedit editing core and diagnostics.

pub use nanoedit_core::{
    buffer, command, config, constants, editor, error, fileinfo, history, persist, replace,
    search, stats,
};
pub use nanoedit_core::{
    describe, Command, Config, ContentEncoding, DocStats, EditorCore, EditorError, EditorState,
    FileReport, Notice, TextBuffer,
};
