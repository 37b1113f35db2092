use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Down,
    Up,
    Enter,
    Escape,
    /// Printable character typed by the user.
    Char(char),
    /// Any other host key code.
    Other(u32),
}

impl Key {
    pub const DOWN_ARROW: u32 = 40;
    pub const UP_ARROW: u32 = 38;
    pub const ENTER: u32 = 13;
    pub const ESCAPE: u32 = 27;

    /// Maps a host key code; codes the list does not care about stay `Other`.
    pub fn from_code(code: u32) -> Self {
        match code {
            Self::DOWN_ARROW => Key::Down,
            Self::UP_ARROW => Key::Up,
            Self::ENTER => Key::Enter,
            Self::ESCAPE => Key::Escape,
            other => Key::Other(other),
        }
    }

    /// Keys the open list consumes.
    pub fn is_list_key(self) -> bool {
        matches!(self, Key::Down | Key::Up | Key::Enter | Key::Escape)
    }
}

/// What the host reports about the caret at event time.
///
/// `caret` is a char offset into `node_text`; `following` holds the text of
/// the nodes after the caret's node, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaretSnapshot {
    pub node_text: String,
    pub caret: usize,
    pub following: Vec<String>,
}

impl CaretSnapshot {
    pub fn new(node_text: impl Into<String>, caret: usize) -> Self {
        Self {
            node_text: node_text.into(),
            caret,
            following: Vec::new(),
        }
    }

    /// Caret at the end of `node_text`.
    pub fn at_end(node_text: impl Into<String>) -> Self {
        let node_text = node_text.into();
        let caret = node_text.chars().count();
        Self::new(node_text, caret)
    }

    pub fn with_following(mut self, following: Vec<String>) -> Self {
        self.following = following;
        self
    }

    /// Text after the caret: rest of the node, then the following nodes.
    pub fn trailing_segments(&self) -> impl Iterator<Item = &str> + '_ {
        let rest = self
            .node_text
            .char_indices()
            .nth(self.caret)
            .map(|(idx, _)| &self.node_text[idx..])
            .unwrap_or("");
        std::iter::once(rest).chain(self.following.iter().map(String::as_str))
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    KeyUp { key: Key, caret: CaretSnapshot },
    KeyDown { key: Key, caret: CaretSnapshot },
    KeyPress { key: Key },
    HoverItem { index: usize },
    ClickItem { index: usize, caret: CaretSnapshot },
    EditorClick,
    Blur { now: Instant },
    Tick { now: Instant },
}
