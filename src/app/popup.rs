use unicode_width::UnicodeWidthStr;

use crate::kernel::AutocompleteOption;

const MIN_WIDTH: u16 = 8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Vertical anchor: offset from the top, or flush with the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Top(u16),
    Bottom(u16),
}

/// Horizontal anchor: offset from the left, or flush with the right edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Left(u16),
    Right(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub vertical: Vertical,
    pub horizontal: Horizontal,
    pub width: u16,
    pub height: u16,
}

/// Places a `width` x `height` list under the caret cell, switching to the
/// bottom/right edge when it would leave the viewport.
pub fn place(caret: (u16, u16), width: u16, height: u16, viewport: Viewport) -> Placement {
    let width = width.min(viewport.width.max(1));
    let height = height.min(viewport.height.max(1));
    let (cx, cy) = caret;

    let top = cy.saturating_add(1);
    let vertical = if top.saturating_add(height) > viewport.height {
        Vertical::Bottom(0)
    } else {
        Vertical::Top(top)
    };
    let horizontal = if cx.saturating_add(width) > viewport.width {
        Horizontal::Right(0)
    } else {
        Horizontal::Left(cx)
    };

    Placement {
        vertical,
        horizontal,
        width,
        height,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupEntry {
    pub option: AutocompleteOption,
    pub selected: bool,
}

/// Suggestion list as the host would render it.
#[derive(Debug, Clone, Default)]
pub struct PopupView {
    entries: Vec<PopupEntry>,
    matched_token: String,
    visible: bool,
    placement: Option<Placement>,
}

impl PopupView {
    pub fn entries(&self) -> &[PopupEntry] {
        &self.entries
    }

    pub fn matched_token(&self) -> &str {
        &self.matched_token
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    pub fn selected(&self) -> Option<usize> {
        self.entries.iter().position(|entry| entry.selected)
    }

    pub fn replace(&mut self, options: Vec<AutocompleteOption>, matched_token: &str) {
        self.entries = options
            .into_iter()
            .map(|option| PopupEntry {
                option,
                selected: false,
            })
            .collect();
        self.matched_token = matched_token.to_string();
    }

    /// At most one entry carries the selected marker.
    pub fn set_selected(&mut self, index: usize) {
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.selected = i == index;
        }
    }

    pub fn show(&mut self, caret: (u16, u16), viewport: Viewport) {
        let (width, height) = self.measure();
        self.placement = Some(place(caret, width, height, viewport));
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.placement = None;
    }

    /// Marker column plus widest label, framed by a one-cell border.
    fn measure(&self) -> (u16, u16) {
        let widest = self
            .entries
            .iter()
            .map(|entry| UnicodeWidthStr::width(entry.option.label.as_str()))
            .max()
            .unwrap_or(0);
        let width = widest.saturating_add(2).saturating_add(2);
        let height = self.entries.len().saturating_add(2);
        (
            (width.min(u16::MAX as usize) as u16).max(MIN_WIDTH),
            height.min(u16::MAX as usize) as u16,
        )
    }

    pub fn render_lines(&self) -> Vec<String> {
        if !self.visible {
            return Vec::new();
        }
        self.entries
            .iter()
            .map(|entry| {
                let marker = if entry.selected { ">" } else { " " };
                format!("{marker} {}", entry.option.label)
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/popup.rs"]
mod tests;
