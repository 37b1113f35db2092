use std::time::Instant;

use super::matcher::AutocompleteOption;

/// State of one open suggestion interaction.
///
/// `matches` is only ever replaced as a whole; `selected`, when set, always
/// indexes into it.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub visible: bool,
    pub matches: Vec<AutocompleteOption>,
    /// Token the matches were computed for, trigger stripped.
    pub matched_token: String,
    pub selected: Option<usize>,
    /// Set by an Enter commit so the following key-press does not insert a newline.
    pub cancel_enter: bool,
    /// Deferred hide scheduled by a blur.
    pub hide_deadline: Option<Instant>,
}

impl SessionState {
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn replace_matches(&mut self, token: &str, matches: Vec<AutocompleteOption>) {
        self.matches = matches;
        self.matched_token.clear();
        self.matched_token.push_str(token);
        self.selected = None;
    }

    /// Moves the highlight forward, wrapping to the first entry.
    pub fn select_next(&mut self) -> Option<usize> {
        if self.matches.is_empty() {
            return None;
        }
        let next = match self.selected {
            Some(idx) if idx + 1 < self.matches.len() => idx + 1,
            _ => 0,
        };
        self.selected = Some(next);
        self.selected
    }

    /// Moves the highlight back, wrapping to the last entry.
    pub fn select_previous(&mut self) -> Option<usize> {
        if self.matches.is_empty() {
            return None;
        }
        let prev = match self.selected {
            Some(idx) if idx > 0 => idx - 1,
            _ => self.matches.len() - 1,
        };
        self.selected = Some(prev);
        self.selected
    }

    pub fn highlight(&mut self, index: usize) -> bool {
        if index >= self.matches.len() || self.selected == Some(index) {
            return false;
        }
        self.selected = Some(index);
        true
    }

    pub fn selected_option(&self) -> Option<&AutocompleteOption> {
        self.matches.get(self.selected?)
    }

    /// Highlighted option, falling back to the first match.
    pub fn commit_candidate(&self) -> Option<&AutocompleteOption> {
        self.selected_option().or_else(|| self.matches.first())
    }

    pub fn schedule_hide(&mut self, deadline: Instant) {
        self.hide_deadline = Some(deadline);
    }

    pub fn hide_due(&self, now: Instant) -> bool {
        self.hide_deadline.is_some_and(|deadline| now >= deadline)
    }

    pub fn is_active(&self) -> bool {
        self.visible
            || !self.matches.is_empty()
            || self.selected.is_some()
            || self.hide_deadline.is_some()
    }

    /// Drops the interaction, keeping `cancel_enter`. Returns whether the list
    /// was visible.
    pub fn close(&mut self) -> bool {
        let was_visible = self.visible;
        let cancel_enter = self.cancel_enter;
        *self = Self {
            cancel_enter,
            ..Self::default()
        };
        was_visible
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
