use ropey::Rope;
use unicode_width::UnicodeWidthStr;

use crate::kernel::CaretSnapshot;

/// In-memory host document. Each line is one text node.
#[derive(Debug, Clone, Default)]
pub struct Document {
    rope: Rope,
    /// Absolute char offset.
    caret: usize,
}

impl Document {
    /// Caret at the end of `text`.
    pub fn new(text: &str) -> Self {
        let rope = Rope::from_str(text);
        let caret = rope.len_chars();
        Self { rope, caret }
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn set_caret(&mut self, caret: usize) {
        self.caret = caret.min(self.rope.len_chars());
    }

    pub fn insert_at_caret(&mut self, text: &str) {
        self.rope.insert(self.caret, text);
        self.caret += text.chars().count();
    }

    pub fn delete_backward(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        self.rope.remove(self.caret - 1..self.caret);
        self.caret -= 1;
        true
    }

    /// Replaces `from..to` (absolute, clamped) and leaves the caret after the
    /// inserted text.
    pub fn replace(&mut self, from: usize, to: usize, text: &str) {
        let len = self.rope.len_chars();
        let to = to.min(len);
        let from = from.min(to);
        self.rope.remove(from..to);
        self.rope.insert(from, text);
        self.caret = from + text.chars().count();
    }

    fn caret_line(&self) -> usize {
        self.rope.char_to_line(self.caret)
    }

    /// Absolute offset where the caret's node starts.
    pub fn node_start(&self) -> usize {
        self.rope.line_to_char(self.caret_line())
    }

    fn line_text(&self, line: usize) -> String {
        let text = self.rope.line(line).to_string();
        let trimmed = text.trim_end_matches(&['\n', '\r'][..]);
        trimmed.to_string()
    }

    pub fn snapshot(&self) -> CaretSnapshot {
        let line = self.caret_line();
        let following = (line + 1..self.rope.len_lines())
            .map(|idx| self.line_text(idx))
            .collect();
        CaretSnapshot::new(self.line_text(line), self.caret - self.node_start())
            .with_following(following)
    }

    /// Screen cell of the caret as `(column, row)`, columns measured in
    /// display width.
    pub fn caret_cell(&self) -> (u16, u16) {
        let line = self.caret_line();
        let before = self.rope.slice(self.node_start()..self.caret).to_string();
        let col = UnicodeWidthStr::width(before.as_str());
        (
            col.min(u16::MAX as usize) as u16,
            line.min(u16::MAX as usize) as u16,
        )
    }
}
