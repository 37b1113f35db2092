//! Token extraction under the caret.

use super::services::ports::{Activation, DelimiterSet};

/// Returns the token that ends at `caret` (a char offset into `text`), or `""`
/// when there is no active autocomplete context.
///
/// The token starts right after the nearest delimiter before the caret, or at
/// the start of `text`. Offsets past the end are clamped.
pub fn extract_current_token<'a>(
    text: &'a str,
    caret: usize,
    delimiters: &DelimiterSet,
    activation: Activation,
) -> &'a str {
    let end = byte_offset(text, caret);
    let before = &text[..end];

    let start = before
        .char_indices()
        .rev()
        .find(|(_, ch)| delimiters.contains(*ch))
        .map(|(idx, ch)| idx + ch.len_utf8())
        .unwrap_or(0);

    let token = &before[start..];
    if is_active(token, activation) {
        token
    } else {
        ""
    }
}

/// Token without its trigger; unchanged in minimum-length mode.
pub fn strip_trigger(token: &str, activation: Activation) -> &str {
    match activation {
        Activation::Trigger(trigger) => token.strip_prefix(trigger).unwrap_or(token),
        Activation::MinLength(_) => token,
    }
}

fn is_active(token: &str, activation: Activation) -> bool {
    if token.is_empty() {
        return false;
    }
    match activation {
        Activation::Trigger(trigger) => token.starts_with(trigger),
        Activation::MinLength(min) => token.chars().count() >= min,
    }
}

fn byte_offset(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/word.rs"]
mod tests;
