use std::io;

use serde::{Deserialize, Serialize};

use super::config::{DEFAULT_HIDE_DELAY_MS, DEFAULT_MIN_LENGTH, DEFAULT_TRIGGER};
use crate::kernel::matcher::AutocompleteOption;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Json(serde_json::Error),
    InvalidDelimiter(String),
    InvalidTrigger(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Json(e) => write!(f, "Invalid settings JSON: {}", e),
            ConfigError::InvalidDelimiter(code) => {
                write!(f, "Invalid delimiter character code: {:?}", code)
            }
            ConfigError::InvalidTrigger(trigger) => {
                write!(f, "Trigger must be empty or a single character: {:?}", trigger)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// On-disk autocomplete settings.
///
/// Matcher, stringifier and callbacks are code, so they are attached to the
/// runtime config after loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// CSV of character codes; the first one is inserted after a commit.
    #[serde(default = "default_delimiters")]
    pub delimiters: String,
    /// Empty string switches to minimum-length activation.
    #[serde(default = "default_trigger")]
    pub trigger: String,
    #[serde(default)]
    pub options: OptionList,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enclosing_text: Option<String>,
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default = "default_hide_delay_ms")]
    pub hide_delay_ms: u64,
}

/// Either a CSV string (`"john,jane"`) or a JSON list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionList {
    Csv(String),
    List(Vec<OptionSetting>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionSetting {
    Label(String),
    Entry(AutocompleteOption),
}

impl From<OptionSetting> for AutocompleteOption {
    fn from(setting: OptionSetting) -> Self {
        match setting {
            OptionSetting::Label(label) => AutocompleteOption::new(label),
            OptionSetting::Entry(option) => option,
        }
    }
}

impl OptionList {
    pub fn to_options(&self) -> Vec<AutocompleteOption> {
        match self {
            OptionList::Csv(csv) => csv
                .split(',')
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(AutocompleteOption::new)
                .collect(),
            OptionList::List(items) => items.iter().cloned().map(Into::into).collect(),
        }
    }
}

impl Default for OptionList {
    fn default() -> Self {
        OptionList::List(Vec::new())
    }
}

fn default_delimiters() -> String {
    "160,32".to_string()
}

fn default_trigger() -> String {
    DEFAULT_TRIGGER.to_string()
}

fn default_min_length() -> usize {
    DEFAULT_MIN_LENGTH
}

fn default_hide_delay_ms() -> u64 {
    DEFAULT_HIDE_DELAY_MS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delimiters: default_delimiters(),
            trigger: default_trigger(),
            options: OptionList::default(),
            enclosing_text: None,
            min_length: default_min_length(),
            hide_delay_ms: default_hide_delay_ms(),
        }
    }
}
