/// Maximum number of characters accepted in the add/edit input bar.
pub const CHAR_LIMIT: usize = 500;

/// One keystroke's worth of change to an [`InputBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEdit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
}

/// Single-line text buffer with a cursor measured in chars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    value: String,
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer pre-filled with `value`, cursor at the end.
    ///
    /// The whole value is kept even past `CHAR_LIMIT`; the limit only stops
    /// further insertions.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// The text before the cursor, used to place the terminal cursor.
    pub fn before_cursor(&self) -> &str {
        &self.value[..self.byte_index(self.cursor)]
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(idx, _)| idx)
            .unwrap_or(self.value.len())
    }

    pub fn apply(&mut self, edit: InputEdit) {
        match edit {
            InputEdit::Insert(ch) => {
                if self.char_count() >= CHAR_LIMIT {
                    return;
                }
                let at = self.byte_index(self.cursor);
                self.value.insert(at, ch);
                self.cursor += 1;
            }
            InputEdit::Backspace => {
                if self.cursor == 0 {
                    return;
                }
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
            }
            InputEdit::Delete => {
                if self.cursor < self.char_count() {
                    let at = self.byte_index(self.cursor);
                    self.value.remove(at);
                }
            }
            InputEdit::Left => self.cursor = self.cursor.saturating_sub(1),
            InputEdit::Right => self.cursor = (self.cursor + 1).min(self.char_count()),
            InputEdit::Home => self.cursor = 0,
            InputEdit::End => self.cursor = self.char_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> InputBuffer {
        let mut buf = InputBuffer::new();
        for ch in text.chars() {
            buf.apply(InputEdit::Insert(ch));
        }
        buf
    }

    #[test]
    fn typing_appends_at_cursor() {
        let mut buf = typed("mlk");
        buf.apply(InputEdit::Left);
        buf.apply(InputEdit::Left);
        buf.apply(InputEdit::Insert('i'));
        assert_eq!(buf.value(), "milk");
        assert_eq!(buf.cursor(), 2);
        assert_eq!(buf.before_cursor(), "mi");
    }

    #[test]
    fn backspace_and_delete_handle_multibyte_chars() {
        let mut buf = typed("café!");
        buf.apply(InputEdit::Left);
        buf.apply(InputEdit::Backspace);
        assert_eq!(buf.value(), "caf!");

        buf.apply(InputEdit::Home);
        buf.apply(InputEdit::Delete);
        assert_eq!(buf.value(), "af!");
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn edges_are_no_ops() {
        let mut buf = InputBuffer::new();
        buf.apply(InputEdit::Backspace);
        buf.apply(InputEdit::Delete);
        buf.apply(InputEdit::Left);
        buf.apply(InputEdit::Right);
        assert_eq!(buf, InputBuffer::new());
    }

    #[test]
    fn with_value_places_cursor_at_end() {
        let buf = InputBuffer::with_value("buy oat milk");
        assert_eq!(buf.cursor(), 12);
        assert_eq!(buf.before_cursor(), "buy oat milk");
    }

    #[test]
    fn input_stops_at_char_limit() {
        let mut buf = typed(&"x".repeat(CHAR_LIMIT + 20));
        assert_eq!(buf.value().chars().count(), CHAR_LIMIT);
        buf.apply(InputEdit::Insert('y'));
        assert!(!buf.value().contains('y'));
    }

    #[test]
    fn prefilled_value_longer_than_limit_is_kept_whole() {
        let long = "x".repeat(CHAR_LIMIT + 100);
        let mut buf = InputBuffer::with_value(&long);
        assert_eq!(buf.value(), long);
        assert_eq!(buf.cursor(), CHAR_LIMIT + 100);

        buf.apply(InputEdit::Insert('y'));
        assert_eq!(buf.value(), long);
        buf.apply(InputEdit::Backspace);
        assert_eq!(buf.value().chars().count(), CHAR_LIMIT + 99);
    }

    #[test]
    fn blank_detection_ignores_whitespace() {
        assert!(typed("   ").is_blank());
        assert!(!typed(" a ").is_blank());
    }
}
