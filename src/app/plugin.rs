use std::time::Instant;

use crate::kernel::{Action, AutocompleteConfig, DispatchResult, Effect, Key, Store};

use super::document::Document;
use super::popup::{PopupView, Viewport};

/// What the host should do with the event that was just delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    pub default_cancelled: bool,
    pub state_changed: bool,
}

impl EventOutcome {
    fn merge(self, other: EventOutcome) -> EventOutcome {
        EventOutcome {
            default_cancelled: self.default_cancelled || other.default_cancelled,
            state_changed: self.state_changed || other.state_changed,
        }
    }
}

/// Host adapter: feeds editor events to the [`Store`] and applies the
/// resulting effects to the document, the popup and the configured callbacks.
pub struct Plugin {
    store: Store,
    document: Document,
    popup: PopupView,
    viewport: Viewport,
    focused: bool,
}

impl Plugin {
    pub fn new(config: AutocompleteConfig, document: Document) -> Self {
        Self {
            store: Store::new(config),
            document,
            popup: PopupView::default(),
            viewport: Viewport::new(80, 24),
            focused: true,
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn popup(&self) -> &PopupView {
        &self.popup
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn key_up(&mut self, key: Key) -> EventOutcome {
        let caret = self.document.snapshot();
        self.dispatch(Action::KeyUp { key, caret })
    }

    pub fn key_down(&mut self, key: Key) -> EventOutcome {
        let caret = self.document.snapshot();
        self.dispatch(Action::KeyDown { key, caret })
    }

    pub fn key_press(&mut self, key: Key) -> EventOutcome {
        self.dispatch(Action::KeyPress { key })
    }

    /// Full key stroke as a browser delivers it: down, press, default action
    /// (unless cancelled), up.
    pub fn press(&mut self, key: Key) -> EventOutcome {
        let down = self.key_down(key);
        let press = self.key_press(key);
        let cancelled = down.default_cancelled || press.default_cancelled;
        if !cancelled {
            match key {
                Key::Char(ch) => self.document.insert_at_caret(ch.encode_utf8(&mut [0; 4])),
                Key::Enter => self.document.insert_at_caret("\n"),
                _ => {}
            }
        }
        let up = self.key_up(key);
        down.merge(press).merge(up)
    }

    pub fn type_text(&mut self, text: &str) -> EventOutcome {
        text.chars()
            .fold(EventOutcome::default(), |acc, ch| acc.merge(self.press(Key::Char(ch))))
    }

    pub fn backspace(&mut self) -> EventOutcome {
        let key = Key::Other(8);
        let down = self.key_down(key);
        self.document.delete_backward();
        down.merge(self.key_up(key))
    }

    pub fn hover(&mut self, index: usize) -> EventOutcome {
        self.dispatch(Action::HoverItem { index })
    }

    pub fn click_item(&mut self, index: usize) -> EventOutcome {
        let caret = self.document.snapshot();
        self.dispatch(Action::ClickItem { index, caret })
    }

    pub fn click_editor(&mut self) -> EventOutcome {
        self.focused = true;
        self.dispatch(Action::EditorClick)
    }

    pub fn blur(&mut self, now: Instant) -> EventOutcome {
        self.focused = false;
        self.dispatch(Action::Blur { now })
    }

    pub fn tick(&mut self, now: Instant) -> EventOutcome {
        self.dispatch(Action::Tick { now })
    }

    fn dispatch(&mut self, action: Action) -> EventOutcome {
        let DispatchResult {
            effects,
            state_changed,
        } = self.store.dispatch(action);
        let mut outcome = EventOutcome {
            default_cancelled: false,
            state_changed,
        };

        // Offsets in effects are relative to the node the caret was in.
        let node_start = self.document.node_start();
        for effect in effects {
            match effect {
                Effect::ShowList {
                    entries,
                    matched_token,
                } => {
                    self.popup.replace(entries, &matched_token);
                    self.popup.show(self.document.caret_cell(), self.viewport);
                }
                Effect::Highlight { index } => self.popup.set_selected(index),
                Effect::HideList => self.popup.hide(),
                Effect::ReplaceRange { from, to, text } => {
                    self.document
                        .replace(node_start + from, node_start + to, &text);
                }
                Effect::SetCaret { offset } => self.document.set_caret(node_start + offset),
                Effect::CancelDefault => outcome.default_cancelled = true,
                Effect::Focus => self.focused = true,
                Effect::OptionSelected { option } => {
                    if let Some(callback) = self.store.config().on_select.clone() {
                        callback(&option);
                    }
                }
                Effect::UniqueMatch { option } => {
                    if let Some(callback) = self.store.config().on_match.clone() {
                        callback(&option);
                    }
                }
            }
        }

        outcome
    }
}
