use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::kernel::services::ports::settings::{ConfigError, Result, Settings};
use crate::kernel::services::ports::{AutocompleteConfig, DelimiterSet};

use super::paths::{get_cache_dir, APP_NAME};

const SETTINGS_FILE: &str = "settings.json";

pub fn get_settings_path() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(format!(".{APP_NAME}")).join(SETTINGS_FILE))
}

pub fn ensure_settings_file() -> std::io::Result<PathBuf> {
    let path = get_settings_path().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine settings directory",
        )
    })?;
    write_default_settings(&path)?;
    Ok(path)
}

/// Writes pretty default settings to `path` unless a file is already there.
pub fn write_default_settings(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        let content =
            serde_json::to_string_pretty(&Settings::default()).unwrap_or_else(|_| "{}".to_string());
        std::fs::write(path, content)?;
    }
    Ok(())
}

pub fn load_settings() -> Option<Settings> {
    let path = get_settings_path()?;
    match load_settings_from(&path) {
        Ok(settings) => Some(settings),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to load settings");
            None
        }
    }
}

pub fn load_settings_from(path: &Path) -> Result<Settings> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Parses a CSV list of character codes such as `"160,32"`.
///
/// Blank entries are ignored so `""` yields an empty set.
pub fn parse_delimiter_codes(csv: &str) -> Result<DelimiterSet> {
    let mut chars = Vec::new();
    for part in csv.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let ch = part
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| ConfigError::InvalidDelimiter(part.to_string()))?;
        chars.push(ch);
    }
    Ok(DelimiterSet::from_chars(chars))
}

pub fn parse_trigger(value: &str) -> Result<Option<char>> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(None),
        (Some(ch), None) => Ok(Some(ch)),
        _ => Err(ConfigError::InvalidTrigger(value.to_string())),
    }
}

pub fn build_config(settings: &Settings) -> Result<AutocompleteConfig> {
    let config = AutocompleteConfig {
        delimiters: parse_delimiter_codes(&settings.delimiters)?,
        trigger: parse_trigger(&settings.trigger)?,
        min_length: settings.min_length,
        enclosing_text: settings
            .enclosing_text
            .clone()
            .filter(|text| !text.is_empty()),
        hide_delay: Duration::from_millis(settings.hide_delay_ms),
        ..AutocompleteConfig::default()
    };
    Ok(config.with_options(settings.options.to_options()))
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
