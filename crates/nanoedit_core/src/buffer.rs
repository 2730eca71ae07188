//! Document buffer with character-offset cursor tracking.

/// In-memory editable document.
///
/// Positions are zero-based character offsets, always clamped to
/// `0..=char_len`. Line and column are derived from the text on demand and
/// never stored. The buffer itself is passive: change notification (history
/// recording, search invalidation) is the responsibility of
/// [`crate::editor::EditorCore`].
#[derive(Debug, Clone)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
    max_file_size: usize,
}

/// Placeholder substituted for content that exceeds the load ceiling.
///
/// This is a hard cutoff: the oversized content is never retained.
pub fn oversize_placeholder(size: usize, max: usize) -> String {
    format!("FILE TOO LARGE FOR EDITING\nSize: {} > {}", size, max)
}

impl TextBuffer {
    /// Create an empty buffer with the given load ceiling.
    pub fn new(max_file_size: usize) -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            max_file_size,
        }
    }

    /// Replace the document wholesale, subject to the size ceiling.
    ///
    /// Content longer than the ceiling (in characters) is replaced with a
    /// fixed placeholder naming the actual and maximum sizes. The cursor is
    /// reset to the start of the document.
    ///
    /// # Returns
    /// `true` when the content was accepted, `false` when the placeholder
    /// was substituted.
    pub fn load(&mut self, content: String) -> bool {
        let len = content.chars().count();
        let accepted = len <= self.max_file_size;
        self.text = if accepted {
            content
        } else {
            oversize_placeholder(len, self.max_file_size)
        };
        self.cursor = 0;
        accepted
    }

    /// Full document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the document text, clamping the cursor to the new length.
    pub fn set_text(&mut self, text: String) {
        self.text = text;
        self.cursor = self.cursor.min(self.char_len());
    }

    /// Document length in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Current cursor position as a character offset.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Move the cursor to an absolute character offset, clamped to the
    /// document length.
    pub fn set_position(&mut self, offset: usize) {
        self.cursor = offset.min(self.char_len());
    }

    /// Derive the 1-based (line, column) pair for the current cursor.
    pub fn line_col(&self) -> (usize, usize) {
        let byte = self.byte_of(self.cursor);
        let before = &self.text[..byte];
        let line = before.matches('\n').count() + 1;
        let column = match before.rfind('\n') {
            Some(nl) => before[nl + 1..].chars().count() + 1,
            None => self.cursor + 1,
        };
        (line, column)
    }

    /// Insert text at the cursor, advancing it past the insertion.
    pub fn insert(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let byte = self.byte_of(self.cursor);
        self.text.insert_str(byte, text);
        self.cursor += text.chars().count();
    }

    /// Delete up to `count` characters before the cursor.
    ///
    /// # Returns
    /// The number of characters actually removed.
    pub fn delete_backward(&mut self, count: usize) -> usize {
        let removed = count.min(self.cursor);
        if removed == 0 {
            return 0;
        }
        let start = self.byte_of(self.cursor - removed);
        let end = self.byte_of(self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= removed;
        removed
    }

    /// Delete up to `count` characters after the cursor.
    ///
    /// # Returns
    /// The number of characters actually removed.
    pub fn delete_forward(&mut self, count: usize) -> usize {
        let len = self.char_len();
        let removed = count.min(len - self.cursor);
        if removed == 0 {
            return 0;
        }
        let start = self.byte_of(self.cursor);
        let end = self.byte_of(self.cursor + removed);
        self.text.replace_range(start..end, "");
        removed
    }

    /// Byte index of the given character offset (clamped).
    fn byte_of(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(byte, _)| byte)
            .unwrap_or(self.text.len())
    }
}
