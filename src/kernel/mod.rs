//! Headless autocomplete core (state/action/effect).

pub mod action;
pub mod commit;
pub mod effect;
pub mod matcher;
pub mod services;
pub mod state;
pub mod store;
pub mod word;

pub use action::{Action, CaretSnapshot, Key};
pub use commit::{enclosing_marker_present, plan_commit, CommitPlan};
pub use effect::Effect;
pub use matcher::{AutocompleteOption, MatchStrategy};
pub use services::ports::{Activation, AutocompleteConfig, DelimiterSet};
pub use state::SessionState;
pub use store::{DispatchResult, Store};
pub use word::{extract_current_token, strip_trigger};
