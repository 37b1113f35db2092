use std::time::Instant;

use super::commit::plan_commit;
use super::word::{extract_current_token, strip_trigger};
use super::{Action, AutocompleteConfig, CaretSnapshot, Effect, Key, SessionState};

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn unchanged() -> Self {
        Self {
            effects: Vec::new(),
            state_changed: false,
        }
    }

    fn changed(effects: Vec<Effect>) -> Self {
        Self {
            effects,
            state_changed: true,
        }
    }
}

pub struct Store {
    config: AutocompleteConfig,
    session: SessionState,
}

impl Store {
    pub fn new(config: AutocompleteConfig) -> Self {
        Self {
            config,
            session: SessionState::default(),
        }
    }

    pub fn config(&self) -> &AutocompleteConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::KeyUp { key, caret } => self.key_up(key, &caret),
            Action::KeyDown { key, caret } => self.key_down(key, &caret),
            Action::KeyPress { key } => {
                if key == Key::Enter && self.session.cancel_enter {
                    self.session.cancel_enter = false;
                    DispatchResult::changed(vec![Effect::CancelDefault])
                } else {
                    DispatchResult::unchanged()
                }
            }
            Action::HoverItem { index } => {
                if self.session.visible && self.session.highlight(index) {
                    DispatchResult::changed(vec![Effect::Highlight { index }])
                } else {
                    DispatchResult::unchanged()
                }
            }
            Action::ClickItem { index, caret } => {
                if !self.session.visible || index >= self.session.len() {
                    return DispatchResult::unchanged();
                }
                self.session.highlight(index);
                self.commit(&caret)
            }
            Action::EditorClick => self.hide(),
            Action::Blur { now } => {
                if !self.session.visible {
                    return DispatchResult::unchanged();
                }
                let deadline = now + self.config.hide_delay;
                tracing::debug!(
                    delay_ms = self.config.hide_delay.as_millis() as u64,
                    "hide scheduled on blur"
                );
                self.session.schedule_hide(deadline);
                DispatchResult::changed(Vec::new())
            }
            Action::Tick { now } => self.tick(now),
        }
    }

    fn key_up(&mut self, key: Key, caret: &CaretSnapshot) -> DispatchResult {
        let searches = (!self.session.visible && !matches!(key, Key::Escape | Key::Enter))
            || !key.is_list_key();
        if !searches {
            return DispatchResult::unchanged();
        }

        let activation = self.config.activation();
        let token = extract_current_token(
            &caret.node_text,
            caret.caret,
            &self.config.delimiters,
            activation,
        );
        if token.is_empty() {
            return self.hide();
        }

        let token = strip_trigger(token, activation).to_string();
        self.populate(&token)
    }

    fn populate(&mut self, token: &str) -> DispatchResult {
        let matches = self.config.strategy.filter(token);
        if matches.is_empty() {
            tracing::trace!(token, "no autocomplete matches");
            return self.hide();
        }

        let unique = (matches.len() == 1).then(|| matches[0].clone());
        tracing::debug!(token, matches = matches.len(), "autocomplete list populated");

        self.session.replace_matches(token, matches);
        self.session.visible = true;
        self.session.hide_deadline = None;

        let mut effects = vec![Effect::ShowList {
            entries: self.session.matches.clone(),
            matched_token: self.session.matched_token.clone(),
        }];
        if let Some(index) = self.session.select_next() {
            effects.push(Effect::Highlight { index });
        }
        if let Some(option) = unique {
            effects.push(Effect::UniqueMatch { option });
        }
        DispatchResult::changed(effects)
    }

    fn key_down(&mut self, key: Key, caret: &CaretSnapshot) -> DispatchResult {
        if !self.session.visible {
            return DispatchResult::unchanged();
        }

        match key {
            Key::Down | Key::Up => {
                let selected = if key == Key::Down {
                    self.session.select_next()
                } else {
                    self.session.select_previous()
                };
                let mut effects = Vec::with_capacity(2);
                if let Some(index) = selected {
                    effects.push(Effect::Highlight { index });
                }
                effects.push(Effect::CancelDefault);
                DispatchResult::changed(effects)
            }
            Key::Enter => {
                let mut result = self.commit(caret);
                self.session.cancel_enter = true;
                result.effects.push(Effect::CancelDefault);
                result.state_changed = true;
                result
            }
            Key::Escape => {
                let mut result = self.hide();
                result.effects.push(Effect::CancelDefault);
                result
            }
            Key::Char(_) | Key::Other(_) => DispatchResult::unchanged(),
        }
    }

    fn commit(&mut self, caret: &CaretSnapshot) -> DispatchResult {
        let Some(option) = self.session.commit_candidate().cloned() else {
            tracing::debug!("commit ignored: no matches");
            return DispatchResult::unchanged();
        };

        let plan = plan_commit(
            &self.config,
            &option,
            &self.session.matched_token,
            caret.caret,
            caret.trailing_segments(),
        );
        tracing::debug!(
            label = %option.label,
            from = plan.replace_from,
            to = plan.replace_to,
            "autocomplete option committed"
        );

        let mut effects = vec![
            Effect::ReplaceRange {
                from: plan.replace_from,
                to: plan.replace_to,
                text: plan.insert_text,
            },
            Effect::SetCaret {
                offset: plan.cursor_after,
            },
        ];
        if self.session.close() {
            effects.push(Effect::HideList);
        }
        effects.push(Effect::Focus);
        effects.push(Effect::OptionSelected { option });
        DispatchResult::changed(effects)
    }

    fn tick(&mut self, now: Instant) -> DispatchResult {
        let Some(deadline) = self.session.hide_deadline else {
            return DispatchResult::unchanged();
        };
        if now < deadline {
            return DispatchResult::unchanged();
        }

        let overshoot = now.duration_since(deadline);
        if overshoot.as_millis() > 5 {
            tracing::debug!(
                overshoot_ms = overshoot.as_millis() as u64,
                "deferred hide overshoot"
            );
        }
        self.hide()
    }

    /// Idempotent: hiding a hidden list emits nothing.
    fn hide(&mut self) -> DispatchResult {
        let was_active = self.session.is_active();
        if self.session.close() {
            DispatchResult::changed(vec![Effect::HideList])
        } else {
            DispatchResult {
                effects: Vec::new(),
                state_changed: was_active,
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
