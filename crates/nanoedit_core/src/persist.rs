//! Path safety checks and atomic save-with-backup.

use crate::constants::{SAVE_BACKUP_SUFFIX, SAVE_TEMP_SUFFIX};
use crate::error::EditorError;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Canonical prefixes that are never valid save targets.
const PROTECTED_PREFIXES: &[&str] = &[
    "/proc", "/sys", "/dev", "/boot", "/etc", "/root", "/var/log",
];

/// Whether `path` is an acceptable save target.
///
/// The path is resolved to canonical absolute form (following symlinks) for
/// the denylist check, but writing *through* a symlink is rejected outright.
/// Existing files must be simultaneously readable and writable. Any
/// resolution failure fails closed.
pub fn is_safe_path(path: &Path) -> bool {
    let Some(resolved) = resolve(path) else {
        return false;
    };
    for prefix in PROTECTED_PREFIXES {
        if resolved.starts_with(prefix) {
            return false;
        }
    }
    match path.symlink_metadata() {
        Ok(meta) => {
            if meta.file_type().is_symlink() {
                return false;
            }
            // Demand read+write on the file itself, not just the directory.
            OpenOptions::new().read(true).write(true).open(path).is_ok()
        }
        // Not existing yet is fine; the directory check happened above.
        Err(err) if err.kind() == io::ErrorKind::NotFound => true,
        Err(_) => false,
    }
}

/// Canonicalize a path that may not exist yet: the file itself when
/// present, otherwise its parent joined with the file name.
fn resolve(path: &Path) -> Option<PathBuf> {
    if path.exists() {
        return fs::canonicalize(path).ok();
    }
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name()?;
    Some(fs::canonicalize(parent).ok()?.join(file_name))
}

/// Sibling scratch path used while writing the new content.
fn temp_path(path: &Path) -> PathBuf {
    sibling_with_suffix(path, SAVE_TEMP_SUFFIX)
}

/// Sibling path holding the previous version of the destination.
pub fn backup_path(path: &Path) -> PathBuf {
    sibling_with_suffix(path, SAVE_BACKUP_SUFFIX)
}

fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.file_name().unwrap_or_default());
    name.push(suffix);
    path.with_file_name(name)
}

/// Atomically save `content` to `path`, keeping a backup of any previous
/// version.
///
/// Ordering: write a sibling temp file (synced to disk); if the destination
/// exists, copy it to the backup sibling; atomically rename the temp file
/// onto the destination. The destination is therefore only ever observable
/// as a complete old version or a complete new version, and the original
/// survives a failure at any step before the rename.
///
/// # Errors
/// [`EditorError::UnsafePath`] when the target fails [`is_safe_path`];
/// [`EditorError::Io`] on any filesystem failure (the temp file is cleaned
/// up best-effort).
pub fn save(path: &Path, content: &str) -> Result<(), EditorError> {
    save_with(path, content, |from, to| fs::rename(from, to))
}

/// Save with an injectable final rename step.
fn save_with<F>(path: &Path, content: &str, rename: F) -> Result<(), EditorError>
where
    F: FnOnce(&Path, &Path) -> io::Result<()>,
{
    if !is_safe_path(path) {
        return Err(EditorError::UnsafePath(path.to_path_buf()));
    }

    let temp = temp_path(path);
    let write_temp = || -> io::Result<()> {
        let mut file = File::create(&temp)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()
    };
    write_temp().map_err(|err| cleanup_temp(&temp, err))?;

    if path.exists() {
        // fs::copy carries permission bits over to the backup.
        fs::copy(path, backup_path(path)).map_err(|err| cleanup_temp(&temp, err))?;
    }

    rename(&temp, path).map_err(|err| cleanup_temp(&temp, err))?;
    Ok(())
}

/// Remove the scratch file best-effort and forward the original error.
fn cleanup_temp(temp: &Path, err: io::Error) -> EditorError {
    if let Err(cleanup_err) = fs::remove_file(temp) {
        if cleanup_err.kind() != io::ErrorKind::NotFound {
            tracing::warn!(
                "Failed to remove scratch file {:?}: {}",
                temp,
                cleanup_err
            );
        }
    }
    EditorError::Io(err)
}
