use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use rustc_hash::FxHashSet;
use serde_json::Value;

use crate::kernel::matcher::{AutocompleteOption, MatchStrategy};

/// NBSP first, so a committed option is followed by a non-collapsing space.
pub const DEFAULT_DELIMITER_CODES: &[u32] = &[160, 32];
pub const DEFAULT_TRIGGER: char = '@';
pub const DEFAULT_MIN_LENGTH: usize = 3;
pub const DEFAULT_HIDE_DELAY_MS: u64 = 500;

/// Projects an option to the text that gets inserted on commit.
pub type Stringifier = Arc<dyn Fn(&AutocompleteOption) -> String + Send + Sync>;

/// Host hook invoked with an option (post-select, post-match).
pub type OptionCallback = Arc<dyn Fn(&AutocompleteOption) + Send + Sync>;

/// Ordered set of token delimiters.
///
/// The first entry doubles as the separator inserted after a committed option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelimiterSet {
    ordered: Vec<char>,
    lookup: FxHashSet<char>,
}

impl DelimiterSet {
    pub fn from_chars(chars: impl IntoIterator<Item = char>) -> Self {
        let mut set = Self::default();
        for ch in chars {
            if set.lookup.insert(ch) {
                set.ordered.push(ch);
            }
        }
        set
    }

    /// Codes that are not Unicode scalar values are skipped; validation belongs
    /// to the settings loader.
    pub fn from_codes(codes: &[u32]) -> Self {
        Self::from_chars(codes.iter().filter_map(|&code| char::from_u32(code)))
    }

    pub fn contains(&self, ch: char) -> bool {
        self.lookup.contains(&ch)
    }

    pub fn primary(&self) -> Option<char> {
        self.ordered.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.ordered.iter().copied()
    }
}

/// How a token under the caret becomes an active autocomplete context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Token must start with this character.
    Trigger(char),
    /// No trigger; token must be at least this many characters long.
    MinLength(usize),
}

#[derive(Clone)]
pub struct AutocompleteConfig {
    pub delimiters: DelimiterSet,
    pub trigger: Option<char>,
    pub min_length: usize,
    pub strategy: MatchStrategy,
    pub enclosing_text: Option<String>,
    pub hide_delay: Duration,
    pub stringifier: Option<Stringifier>,
    pub on_select: Option<OptionCallback>,
    pub on_match: Option<OptionCallback>,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            delimiters: DelimiterSet::from_codes(DEFAULT_DELIMITER_CODES),
            trigger: Some(DEFAULT_TRIGGER),
            min_length: DEFAULT_MIN_LENGTH,
            strategy: MatchStrategy::PrefixList(Vec::new()),
            enclosing_text: None,
            hide_delay: Duration::from_millis(DEFAULT_HIDE_DELAY_MS),
            stringifier: None,
            on_select: None,
            on_match: None,
        }
    }
}

impl fmt::Debug for AutocompleteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutocompleteConfig")
            .field("delimiters", &self.delimiters)
            .field("trigger", &self.trigger)
            .field("min_length", &self.min_length)
            .field("strategy", &self.strategy)
            .field("enclosing_text", &self.enclosing_text)
            .field("hide_delay", &self.hide_delay)
            .field("stringifier", &self.stringifier.is_some())
            .field("on_select", &self.on_select.is_some())
            .field("on_match", &self.on_match.is_some())
            .finish()
    }
}

impl AutocompleteConfig {
    pub fn with_options<I, O>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<AutocompleteOption>,
    {
        self.strategy = MatchStrategy::PrefixList(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_matcher<F>(mut self, matcher: F) -> Self
    where
        F: Fn(&str) -> Vec<AutocompleteOption> + Send + Sync + 'static,
    {
        self.strategy = MatchStrategy::custom(matcher);
        self
    }

    pub fn with_delimiters(mut self, delimiters: DelimiterSet) -> Self {
        self.delimiters = delimiters;
        self
    }

    pub fn with_trigger(mut self, trigger: Option<char>) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn with_enclosing_text(mut self, text: impl Into<String>) -> Self {
        self.enclosing_text = Some(text.into());
        self
    }

    pub fn with_hide_delay(mut self, delay: Duration) -> Self {
        self.hide_delay = delay;
        self
    }

    pub fn with_stringifier<F>(mut self, stringifier: F) -> Self
    where
        F: Fn(&AutocompleteOption) -> String + Send + Sync + 'static,
    {
        self.stringifier = Some(Arc::new(stringifier));
        self
    }

    pub fn on_select<F>(mut self, callback: F) -> Self
    where
        F: Fn(&AutocompleteOption) + Send + Sync + 'static,
    {
        self.on_select = Some(Arc::new(callback));
        self
    }

    pub fn on_match<F>(mut self, callback: F) -> Self
    where
        F: Fn(&AutocompleteOption) + Send + Sync + 'static,
    {
        self.on_match = Some(Arc::new(callback));
        self
    }

    pub fn activation(&self) -> Activation {
        match self.trigger {
            Some(trigger) => Activation::Trigger(trigger),
            None => Activation::MinLength(self.min_length),
        }
    }

    pub fn trigger_str(&self) -> String {
        self.trigger.map(String::from).unwrap_or_default()
    }

    pub fn primary_delimiter_str(&self) -> String {
        self.delimiters.primary().map(String::from).unwrap_or_default()
    }

    /// Text inserted for `option`: the stringifier when configured, otherwise
    /// string values verbatim, `null` as the label, anything else as JSON.
    pub fn option_text(&self, option: &AutocompleteOption) -> String {
        if let Some(stringifier) = self.stringifier.as_ref() {
            return stringifier(option);
        }
        match &option.value {
            Value::Null => option.label.clone(),
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}
