//! Replacement computation for a committed option.

use super::matcher::AutocompleteOption;
use super::services::ports::{AutocompleteConfig, DelimiterSet};

/// Node-relative edit produced by a commit. Offsets are char offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitPlan {
    pub replace_from: usize,
    pub replace_to: usize,
    pub insert_text: String,
    /// Caret after the edit: right after the separator, before any
    /// enclosing marker.
    pub cursor_after: usize,
}

impl CommitPlan {
    pub fn replaced_len(&self) -> usize {
        self.replace_to - self.replace_from
    }
}

/// Builds the edit that swaps the typed `trigger + matched_token` (ending at
/// `caret`) for `trigger + option + delimiter`, followed by
/// `delimiter + trigger + enclosing` unless that marker already follows the
/// caret in `following`.
pub fn plan_commit<I, S>(
    config: &AutocompleteConfig,
    option: &AutocompleteOption,
    matched_token: &str,
    caret: usize,
    following: I,
) -> CommitPlan
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let trigger = config.trigger_str();
    let delimiter = config.primary_delimiter_str();

    let typed_len = trigger.chars().count() + matched_token.chars().count();
    let replace_from = caret.saturating_sub(typed_len);

    let mut insert_text = format!("{trigger}{}{delimiter}", config.option_text(option));
    let cursor_after = replace_from + insert_text.chars().count();

    if let Some(enclosing) = config.enclosing_text.as_deref().filter(|t| !t.is_empty()) {
        let marker = format!("{trigger}{enclosing}");
        if enclosing_marker_present(following, &marker, &config.delimiters) {
            tracing::trace!(marker = %marker, "enclosing marker already present");
        } else {
            insert_text.push_str(&delimiter);
            insert_text.push_str(&marker);
        }
    }

    CommitPlan {
        replace_from,
        replace_to: caret,
        insert_text,
        cursor_after,
    }
}

/// Whether `marker` directly follows the insertion point.
///
/// `segments` is the text after the caret in document order (rest of the
/// caret's node, then following siblings). Leading delimiters are skipped and
/// exactly `marker`'s length is compared; the walk stops at the first
/// mismatch.
pub fn enclosing_marker_present<I, S>(segments: I, marker: &str, delimiters: &DelimiterSet) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut expected = marker.chars().peekable();
    if expected.peek().is_none() {
        return true;
    }

    let mut leading = true;
    for segment in segments {
        for ch in segment.as_ref().chars() {
            if leading && delimiters.contains(ch) {
                continue;
            }
            leading = false;

            match expected.next() {
                Some(want) if want == ch => {
                    if expected.peek().is_none() {
                        return true;
                    }
                }
                _ => return false,
            }
        }
    }
    false
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/commit.rs"]
mod tests;
