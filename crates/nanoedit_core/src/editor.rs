//! Editor orchestration: owns the buffer, history, and search state and
//! dispatches input commands from the presentation layer.

use crate::buffer::{oversize_placeholder, TextBuffer};
use crate::command::{Command, EditorState, Notice};
use crate::config::Config;
use crate::error::EditorError;
use crate::history::HistoryLog;
use crate::persist;
use crate::replace;
use crate::search::SearchIndex;
use crate::stats::StatsTracker;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// The editing core behind a single open document.
///
/// One instance per document, owned and passed around explicitly by the
/// caller; there is no process-wide editor state. All mutation runs
/// synchronously inside [`handle`](Self::handle), so the core needs no
/// locking. Autosave is a wall-clock check performed once per handled
/// command, never a background task.
#[derive(Debug)]
pub struct EditorCore {
    path: PathBuf,
    buffer: TextBuffer,
    history: HistoryLog,
    search: SearchIndex,
    stats: StatsTracker,
    config: Config,
    modified: bool,
    search_query: String,
    last_match: Option<usize>,
    last_saved_at: Instant,
}

impl EditorCore {
    /// Open a document.
    ///
    /// Reads `path` when it exists (files larger than the configured
    /// ceiling are replaced with a placeholder without ever loading the
    /// content; invalid UTF-8 is read lossily). A missing file seeds an
    /// empty buffer that is already marked modified, so an explicit save
    /// creates it.
    ///
    /// # Errors
    /// [`EditorError::Io`] when the initial read fails; this is the only
    /// fatal error in the core.
    pub fn open(path: impl AsRef<Path>, config: Config) -> Result<Self, EditorError> {
        let path = absolutize(path.as_ref())?;
        let mut buffer = TextBuffer::new(config.max_file_size);
        let mut modified = false;

        if path.exists() {
            let meta = fs::metadata(&path)?;
            if meta.len() > config.max_file_size as u64 {
                // Size gate on metadata: the oversized content is never
                // read into memory at all.
                buffer.set_text(oversize_placeholder(
                    meta.len() as usize,
                    config.max_file_size,
                ));
                tracing::warn!(
                    "{:?} exceeds the load ceiling ({} > {})",
                    path,
                    meta.len(),
                    config.max_file_size
                );
            } else {
                let raw = fs::read(&path)?;
                buffer.load(String::from_utf8_lossy(&raw).into_owned());
            }
        } else {
            modified = true;
        }

        let history = HistoryLog::new(
            buffer.text().to_string(),
            config.max_history_size,
            config.history_diff_threshold,
        );
        Ok(Self {
            path,
            buffer,
            history,
            search: SearchIndex::new(),
            stats: StatsTracker::new(),
            config,
            modified,
            search_query: String::new(),
            last_match: None,
            last_saved_at: Instant::now(),
        })
    }

    /// Handle one input command and return the refreshed render state.
    pub fn handle(&mut self, command: Command) -> EditorState {
        let mut notice = None;
        match command {
            Command::InsertText(text) => self.mutate(|buffer| buffer.insert(&text)),
            Command::DeleteBackward(count) => self.mutate(|buffer| {
                buffer.delete_backward(count);
            }),
            Command::DeleteForward(count) => self.mutate(|buffer| {
                buffer.delete_forward(count);
            }),
            Command::MoveCursor(offset) => self.buffer.set_position(offset),
            Command::Undo => match self.history.undo() {
                Some(text) => self.jump_to(text),
                None => notice = Some(Notice::NothingToUndo),
            },
            Command::Redo => match self.history.redo() {
                Some(text) => self.jump_to(text),
                None => notice = Some(Notice::NothingToRedo),
            },
            Command::StartSearch => {
                self.search_query.clear();
                self.search.clear();
            }
            Command::SubmitSearchQuery(query) => {
                if query.is_empty() {
                    notice = Some(Notice::EmptyQuery);
                } else {
                    self.search_query = query;
                    notice = Some(self.locate(true));
                }
            }
            Command::FindNext => notice = Some(self.navigate(true)),
            Command::FindPrev => notice = Some(self.navigate(false)),
            Command::StartReplace => {
                self.search_query.clear();
                self.search.clear();
                self.last_match = None;
            }
            Command::SubmitReplace { query, replacement } => {
                notice = Some(self.submit_replace(query, replacement));
            }
            Command::Save => notice = Some(self.save_manual()),
            // Exit takes effect immediately; no autosave on the way out.
            Command::Exit => return self.snapshot(None, true),
        }
        self.autosave_tick();
        self.snapshot(notice, false)
    }

    /// Current render state without handling a command.
    pub fn state(&mut self) -> EditorState {
        self.snapshot(None, false)
    }

    /// Full document text.
    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    /// The document's backing path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether there are unsaved changes.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Apply a buffer edit; on an actual content change, record history,
    /// invalidate the search cache, and mark the document modified.
    fn mutate<F: FnOnce(&mut TextBuffer)>(&mut self, edit: F) {
        let old = self.buffer.text().to_string();
        edit(&mut self.buffer);
        if self.buffer.text() != old {
            self.history.record(&old, self.buffer.text());
            self.search.clear();
            self.modified = true;
        }
    }

    /// Replace the document wholesale after an undo/redo jump.
    fn jump_to(&mut self, text: String) {
        self.buffer.set_text(text);
        self.search.clear();
        self.stats.invalidate();
        self.modified = !self.history.at_tail();
    }

    /// Navigate within the active query, if any.
    fn navigate(&mut self, forward: bool) -> Notice {
        if self.search_query.is_empty() {
            return Notice::EmptyQuery;
        }
        self.locate(forward)
    }

    /// Run the active query and move the cursor to the chosen match.
    fn locate(&mut self, forward: bool) -> Notice {
        let positions = self.search.positions(self.buffer.text(), &self.search_query);
        match SearchIndex::find_next(positions, self.buffer.position(), forward) {
            Some(position) => {
                self.buffer.set_position(position);
                self.last_match = Some(position);
                Notice::Found {
                    query: self.search_query.clone(),
                }
            }
            None => {
                self.last_match = None;
                Notice::NotFound {
                    query: self.search_query.clone(),
                }
            }
        }
    }

    /// Replace the current match if its span is still valid, then advance
    /// to the next one. A stale span fails silently: the re-search below
    /// refreshes the match positions either way.
    fn submit_replace(&mut self, query: String, replacement: String) -> Notice {
        if query.is_empty() {
            return Notice::EmptyQuery;
        }
        self.search_query = query.clone();

        let mut replaced = false;
        if let Some(position) = self.last_match {
            match replace::replace_at(self.buffer.text(), position, &query, &replacement) {
                Some((new_text, cursor)) => {
                    self.mutate(move |buffer| {
                        buffer.set_text(new_text);
                        buffer.set_position(cursor);
                    });
                    replaced = true;
                }
                None => tracing::debug!("Replace target went stale; re-searching"),
            }
        }

        let follow_up = self.locate(true);
        if replaced {
            Notice::Replaced { query, replacement }
        } else {
            follow_up
        }
    }

    /// Manual save: failures surface to the user.
    fn save_manual(&mut self) -> Notice {
        match self.do_save() {
            Ok(()) => Notice::Saved {
                path: self.path.clone(),
            },
            Err(err) => {
                tracing::warn!("Save failed for {:?}: {}", self.path, err);
                Notice::SaveFailed {
                    reason: err.to_string(),
                }
            }
        }
    }

    fn do_save(&mut self) -> Result<(), EditorError> {
        persist::save(&self.path, self.buffer.text())?;
        self.modified = false;
        self.last_saved_at = Instant::now();
        Ok(())
    }

    /// Timer-driven autosave, checked once per handled command. Failures
    /// are swallowed so they never interrupt editing; the interval is
    /// counted from the last successful save of either kind.
    fn autosave_tick(&mut self) {
        let interval = Duration::from_secs(self.config.autosave_interval_secs);
        if self.last_saved_at.elapsed() < interval {
            return;
        }
        match self.do_save() {
            Ok(()) => tracing::debug!("Autosaved {:?}", self.path),
            Err(err) => tracing::debug!("Autosave skipped for {:?}: {}", self.path, err),
        }
    }

    fn snapshot(&mut self, notice: Option<Notice>, should_exit: bool) -> EditorState {
        let (line, column) = self.buffer.line_col();
        EditorState {
            cursor: self.buffer.position(),
            line,
            column,
            modified: self.modified,
            stats: self.stats.get(self.buffer.text()),
            last_match: self.last_match,
            should_exit,
            notice,
        }
    }
}

/// Anchor a possibly-relative path to the current working directory.
fn absolutize(path: &Path) -> Result<PathBuf, EditorError> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
