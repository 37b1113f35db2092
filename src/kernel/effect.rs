use super::matcher::AutocompleteOption;

/// Intents for the host adapter. Offsets are node-relative char offsets.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ShowList {
        entries: Vec<AutocompleteOption>,
        matched_token: String,
    },
    Highlight {
        index: usize,
    },
    HideList,
    ReplaceRange {
        from: usize,
        to: usize,
        text: String,
    },
    SetCaret {
        offset: usize,
    },
    /// Suppress the host's default action for the current event.
    CancelDefault,
    Focus,
    OptionSelected {
        option: AutocompleteOption,
    },
    UniqueMatch {
        option: AutocompleteOption,
    },
}
