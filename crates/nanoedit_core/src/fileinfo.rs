//! Stateless file diagnostics for the companion CLI.

use crate::error::EditorError;
use crate::stats::{self, DocStats};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Best-effort classification of a file's text encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentEncoding {
    Utf8,
    Utf8Bom,
    Utf16,
    Binary,
}

/// Filesystem metadata and content report for a path.
///
/// Produced by [`describe`]; read-only and independent of any editing
/// session. Content-derived fields (`encoding`, `stats`, `content_hash`)
/// are absent for directories.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub is_file: bool,
    pub is_dir: bool,
    pub size: u64,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub accessed: Option<DateTime<Utc>>,
    /// Octal permission bits (Unix only).
    pub permissions: Option<String>,
    /// MIME type guessed from the file extension.
    pub mime: Option<&'static str>,
    pub encoding: Option<ContentEncoding>,
    pub stats: Option<DocStats>,
    /// Hex-encoded BLAKE3 hash of the raw contents.
    pub content_hash: Option<String>,
}

/// Report filesystem metadata and content statistics for `path`.
///
/// # Errors
/// [`EditorError::Io`] when the path cannot be stat'ed or read.
pub fn describe(path: &Path) -> Result<FileReport, EditorError> {
    let meta = fs::metadata(path)?;
    let resolved = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

    let mut report = FileReport {
        path: resolved,
        is_file: meta.is_file(),
        is_dir: meta.is_dir(),
        size: meta.len(),
        created: meta.created().ok().map(to_utc),
        modified: meta.modified().ok().map(to_utc),
        accessed: meta.accessed().ok().map(to_utc),
        permissions: permissions_octal(&meta),
        mime: mime_for_path(path),
        encoding: None,
        stats: None,
        content_hash: None,
    };

    if meta.is_file() {
        let data = fs::read(path)?;
        report.content_hash = Some(blake3::hash(&data).to_hex().to_string());
        report.encoding = Some(detect_encoding(&data));
        report.stats = Some(stats::compute(&String::from_utf8_lossy(&data)));
    }
    Ok(report)
}

fn to_utc(time: SystemTime) -> DateTime<Utc> {
    time.into()
}

#[cfg(unix)]
fn permissions_octal(meta: &fs::Metadata) -> Option<String> {
    use std::os::unix::fs::PermissionsExt;
    Some(format!("{:03o}", meta.permissions().mode() & 0o777))
}

#[cfg(not(unix))]
fn permissions_octal(_meta: &fs::Metadata) -> Option<String> {
    None
}

/// Classify the encoding from a byte prefix: BOMs first, then NUL bytes
/// (a strong binary signal even inside valid UTF-8), then UTF-8 validity.
fn detect_encoding(data: &[u8]) -> ContentEncoding {
    const SAMPLE_MAX_BYTES: usize = 64 * 1024;
    if data.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return ContentEncoding::Utf8Bom;
    }
    if data.starts_with(&[0xFF, 0xFE]) || data.starts_with(&[0xFE, 0xFF]) {
        return ContentEncoding::Utf16;
    }
    let sample = &data[..data.len().min(SAMPLE_MAX_BYTES)];
    if sample.contains(&0) {
        return ContentEncoding::Binary;
    }
    match std::str::from_utf8(sample) {
        Ok(_) => ContentEncoding::Utf8,
        // A sample boundary can split a multibyte sequence; only an error
        // well before the boundary means genuinely invalid text.
        Err(err) if data.len() > sample.len() && err.valid_up_to() + 4 >= sample.len() => {
            ContentEncoding::Utf8
        }
        Err(_) => ContentEncoding::Binary,
    }
}

/// Extension-based MIME guess for common formats.
fn mime_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "txt" | "text" | "log" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "csv" => "text/csv",
        "xml" => "application/xml",
        "json" => "application/json",
        "yaml" | "yml" => "application/yaml",
        "toml" => "application/toml",
        "js" | "mjs" => "text/javascript",
        "rs" => "text/x-rust",
        "py" => "text/x-python",
        "c" | "h" => "text/x-c",
        "sh" => "application/x-sh",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",
        _ => return None,
    };
    Some(mime)
}
