//! Service ports: data contracts shared by the kernel and adapters.

pub mod config;
pub mod settings;

pub use config::{
    Activation, AutocompleteConfig, DelimiterSet, OptionCallback, Stringifier,
    DEFAULT_DELIMITER_CODES, DEFAULT_HIDE_DELAY_MS, DEFAULT_MIN_LENGTH, DEFAULT_TRIGGER,
};
pub use settings::{ConfigError, OptionList, OptionSetting, Result as ConfigResult, Settings};
