use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A selectable autocomplete entry.
///
/// `label` is what the list shows and what prefix matching runs against;
/// `value` is the payload projected to insert text (`null` means "the label").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutocompleteOption {
    pub label: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub value: Value,
}

impl AutocompleteOption {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: Value::Null,
        }
    }

    pub fn with_value(label: impl Into<String>, value: Value) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

impl From<&str> for AutocompleteOption {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for AutocompleteOption {
    fn from(label: String) -> Self {
        Self::new(label)
    }
}

pub type MatcherFn = Arc<dyn Fn(&str) -> Vec<AutocompleteOption> + Send + Sync>;

/// Strategy that turns a token (trigger already stripped) into matches.
#[derive(Clone)]
pub enum MatchStrategy {
    /// Case-sensitive label prefix match over a static list, order preserved.
    PrefixList(Vec<AutocompleteOption>),
    /// Caller-supplied matcher; fully replaces prefix matching.
    Custom(MatcherFn),
}

impl fmt::Debug for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStrategy::PrefixList(options) => {
                f.debug_tuple("PrefixList").field(&options.len()).finish()
            }
            MatchStrategy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl MatchStrategy {
    pub fn custom<F>(matcher: F) -> Self
    where
        F: Fn(&str) -> Vec<AutocompleteOption> + Send + Sync + 'static,
    {
        MatchStrategy::Custom(Arc::new(matcher))
    }

    pub fn filter(&self, token: &str) -> Vec<AutocompleteOption> {
        match self {
            MatchStrategy::PrefixList(options) => prefix_matches(options, token),
            MatchStrategy::Custom(matcher) => matcher(token),
        }
    }
}

pub fn prefix_matches(options: &[AutocompleteOption], token: &str) -> Vec<AutocompleteOption> {
    if token.is_empty() {
        return options.to_vec();
    }

    options
        .iter()
        .filter(|option| option.label.starts_with(token))
        .cloned()
        .collect()
}
