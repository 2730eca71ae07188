//! Application error types for the editing core.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for core operations.
///
/// Search misses and stale replace targets are reported as ordinary
/// outcomes, not errors; oversize documents are substituted with a
/// placeholder at load time. Everything here is recoverable except an I/O
/// failure during the very first file read, which callers treat as fatal.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Unsafe save path: {}", .0.display())]
    UnsafePath(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
