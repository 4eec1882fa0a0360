use std::ops::Range;

use ropey::Rope;

/// Line/column view of the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (byte offset within the line).
    pub col: usize,
}

impl Cursor {
    pub const fn at(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A rope-backed text buffer with a single byte-offset cursor.
///
/// The cursor always sits on a char boundary. Every mutation bumps
/// [`EditorBuffer::revision`], which is how the surface notices that a
/// change event is due.
pub struct EditorBuffer {
    rope: Rope,
    cursor: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: Option<usize>,
    revision: u64,
    dirty: bool,
}

impl EditorBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: 0,
            col_memory: None,
            revision: 0,
            dirty: false,
        }
    }

    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// Replace the whole content, keeping the cursor where it was when
    /// possible.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = self.snap(self.cursor.min(self.rope.len_bytes()));
        self.col_memory = None;
        self.bump();
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn len(&self) -> usize {
        self.rope.len_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_bytes() == 0
    }

    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Total number of lines; text ending in `\n` has a final empty line.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Content of a line without its line ending.
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx).to_string();
        Some(line.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    /// Length of a line in bytes, line ending excluded.
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.len())
    }

    /// Byte offset of the cursor in the text.
    pub const fn offset(&self) -> usize {
        self.cursor
    }

    pub fn cursor(&self) -> Cursor {
        let line = self.rope.byte_to_line(self.cursor);
        Cursor {
            line,
            col: self.cursor - self.rope.line_to_byte(line),
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf));
    }

    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let char_idx = self.rope.byte_to_char(self.cursor);
        self.rope.insert(char_idx, s);
        self.cursor += s.len();
        self.col_memory = None;
        self.bump();
    }

    /// Split the current line at the cursor (Enter key).
    pub fn split_line(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the character before the cursor (Backspace).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let char_idx = self.rope.byte_to_char(self.cursor);
        self.rope.remove(char_idx - 1..char_idx);
        self.cursor = self.rope.char_to_byte(char_idx - 1);
        self.col_memory = None;
        self.bump();
        true
    }

    /// Delete the character at the cursor (Delete key).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.rope.len_bytes() {
            return false;
        }
        let char_idx = self.rope.byte_to_char(self.cursor);
        self.rope.remove(char_idx..=char_idx);
        self.col_memory = None;
        self.bump();
        true
    }

    /// Replace a byte range and leave the cursor after the replacement.
    ///
    /// The range is clamped to the text and snapped to char boundaries.
    pub fn replace_range(&mut self, range: Range<usize>, replacement: &str) {
        let len = self.rope.len_bytes();
        let start = self.snap(range.start.min(len));
        let end = self.snap(range.end.min(len)).max(start);
        let start_char = self.rope.byte_to_char(start);
        let end_char = self.rope.byte_to_char(end);
        self.rope.remove(start_char..end_char);
        self.rope.insert(start_char, replacement);
        self.cursor = start + replacement.len();
        self.col_memory = None;
        self.bump();
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_vertical(false),
            Direction::Down => self.move_vertical(true),
        }
    }

    /// Move cursor to the beginning of the line (Home).
    pub fn move_home(&mut self) {
        let line = self.cursor().line;
        self.cursor = self.rope.line_to_byte(line);
        self.col_memory = None;
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self) {
        let line = self.cursor().line;
        self.cursor = self.rope.line_to_byte(line) + self.line_len(line);
        self.col_memory = None;
    }

    /// Move cursor one word to the left (Ctrl+Left).
    pub fn move_word_left(&mut self) {
        let text = self.text();
        let before = text[..self.cursor].trim_end();
        self.cursor = before
            .rfind(|c: char| !is_word_char(c))
            .map_or(0, |i| i + before[i..].chars().next().map_or(1, char::len_utf8));
        self.col_memory = None;
    }

    /// Move cursor one word to the right (Ctrl+Right).
    pub fn move_word_right(&mut self) {
        let text = self.text();
        let after = &text[self.cursor..];
        let word_end = after.find(|c: char| !is_word_char(c)).unwrap_or(after.len());
        let rest = &after[word_end..];
        let space_end = rest.find(is_word_char).unwrap_or(rest.len());
        self.cursor += word_end + space_end;
        self.col_memory = None;
    }

    /// Move cursor to a line and column, clamped to the buffer.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let line = line.min(self.line_count().saturating_sub(1));
        let col = col.min(self.line_len(line));
        self.cursor = self.snap(self.rope.line_to_byte(line) + col);
        self.col_memory = None;
    }

    /// Move cursor to the start of the buffer (Ctrl+Home).
    pub const fn move_to_start(&mut self) {
        self.cursor = 0;
        self.col_memory = None;
    }

    /// Move cursor to the end of the buffer (Ctrl+End).
    pub fn move_to_end(&mut self) {
        self.cursor = self.rope.len_bytes();
        self.col_memory = None;
    }

    // --- Private helpers ---

    const fn bump(&mut self) {
        self.revision += 1;
        self.dirty = true;
    }

    /// Snap a byte offset down to the nearest char boundary.
    fn snap(&self, byte: usize) -> usize {
        self.rope.char_to_byte(self.rope.byte_to_char(byte))
    }

    fn move_left(&mut self) {
        let char_idx = self.rope.byte_to_char(self.cursor);
        if char_idx > 0 {
            self.cursor = self.rope.char_to_byte(char_idx - 1);
        }
        self.col_memory = None;
    }

    fn move_right(&mut self) {
        let char_idx = self.rope.byte_to_char(self.cursor);
        if char_idx < self.rope.len_chars() {
            self.cursor = self.rope.char_to_byte(char_idx + 1);
        }
        self.col_memory = None;
    }

    fn move_vertical(&mut self, down: bool) {
        let Cursor { line, col } = self.cursor();
        let target = if down {
            if line + 1 >= self.line_count() {
                return;
            }
            line + 1
        } else {
            let Some(prev) = line.checked_sub(1) else {
                return;
            };
            prev
        };
        let wanted = *self.col_memory.get_or_insert(col);
        let col = wanted.min(self.line_len(target));
        self.cursor = self.snap(self.rope.line_to_byte(target) + col);
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("cursor", &self.cursor)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = EditorBuffer::empty();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some(String::new()));
    }

    #[test]
    fn test_from_text_trailing_newline() {
        let buf = EditorBuffer::from_text("hello\n");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(1), Some(String::new()));
    }

    #[test]
    fn test_line_at_strips_crlf() {
        let buf = EditorBuffer::from_text("one\r\ntwo");
        assert_eq!(buf.line_at(0), Some("one".to_string()));
        assert_eq!(buf.line_len(0), 3);
    }

    #[test]
    fn test_insert_moves_cursor_and_bumps_revision() {
        let mut buf = EditorBuffer::from_text("hllo");
        buf.move_cursor(Direction::Right);
        buf.insert_char('e');
        assert_eq!(buf.text(), "hello");
        assert_eq!(buf.offset(), 2);
        assert_eq!(buf.revision(), 1);
        assert!(buf.is_dirty());
    }

    #[test]
    fn test_insert_multibyte_char() {
        let mut buf = EditorBuffer::from_text("ab");
        buf.move_cursor(Direction::Right);
        buf.insert_char('é');
        assert_eq!(buf.text(), "aéb");
        assert_eq!(buf.cursor(), Cursor::at(0, 3));
    }

    #[test]
    fn test_split_line_moves_to_next_line() {
        let mut buf = EditorBuffer::from_text("helloworld");
        buf.move_to(0, 5);
        buf.split_line();
        assert_eq!(buf.text(), "hello\nworld");
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_delete_back_joins_lines() {
        let mut buf = EditorBuffer::from_text("ab\ncd");
        buf.move_to(1, 0);
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_delete_back_at_start_is_noop() {
        let mut buf = EditorBuffer::from_text("ab");
        assert!(!buf.delete_back());
        assert_eq!(buf.revision(), 0);
    }

    #[test]
    fn test_delete_back_multibyte() {
        let mut buf = EditorBuffer::from_text("aé");
        buf.move_to_end();
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "a");
        assert_eq!(buf.offset(), 1);
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let mut buf = EditorBuffer::from_text("ab");
        buf.move_to_end();
        assert!(!buf.delete_forward());
        buf.move_to_start();
        assert!(buf.delete_forward());
        assert_eq!(buf.text(), "b");
    }

    #[test]
    fn test_replace_range_places_cursor_after_replacement() {
        let mut buf = EditorBuffer::from_text("hi @an there");
        buf.replace_range(3..6, "@andre");
        assert_eq!(buf.text(), "hi @andre there");
        assert_eq!(buf.offset(), 9);
    }

    #[test]
    fn test_replace_range_clamps_out_of_bounds() {
        let mut buf = EditorBuffer::from_text("abc");
        buf.replace_range(2..99, "Z");
        assert_eq!(buf.text(), "abZ");
    }

    #[test]
    fn test_vertical_movement_remembers_column() {
        let mut buf = EditorBuffer::from_text("long line\nab\nanother line");
        buf.move_to(0, 7);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor(), Cursor::at(1, 2));
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor(), Cursor::at(2, 7));
    }

    #[test]
    fn test_left_right_wrap_lines() {
        let mut buf = EditorBuffer::from_text("a\nb");
        buf.move_to(1, 0);
        buf.move_cursor(Direction::Left);
        assert_eq!(buf.cursor(), Cursor::at(0, 1));
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_home_and_end() {
        let mut buf = EditorBuffer::from_text("one\ntwo three");
        buf.move_to(1, 4);
        buf.move_end();
        assert_eq!(buf.cursor(), Cursor::at(1, 9));
        buf.move_home();
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_word_movement() {
        let mut buf = EditorBuffer::from_text("hello big world");
        buf.move_word_right();
        assert_eq!(buf.offset(), 6);
        buf.move_to_end();
        buf.move_word_left();
        assert_eq!(buf.offset(), 10);
    }

    #[test]
    fn test_set_text_clamps_cursor() {
        let mut buf = EditorBuffer::from_text("a long line");
        buf.move_to_end();
        buf.set_text("short");
        assert_eq!(buf.offset(), 5);
        assert_eq!(buf.text(), "short");
    }
}
