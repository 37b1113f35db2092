use super::*;
use crate::kernel::{AutocompleteOption, DelimiterSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn new_store() -> Store {
    Store::new(
        AutocompleteConfig::default()
            .with_delimiters(DelimiterSet::from_codes(&[32]))
            .with_options(["alice", "alan", "bob"]),
    )
}

fn key_up(store: &mut Store, key: Key, text: &str) -> DispatchResult {
    store.dispatch(Action::KeyUp {
        key,
        caret: CaretSnapshot::at_end(text),
    })
}

fn key_down(store: &mut Store, key: Key, text: &str) -> DispatchResult {
    store.dispatch(Action::KeyDown {
        key,
        caret: CaretSnapshot::at_end(text),
    })
}

fn selected_label(store: &Store) -> Option<&str> {
    store
        .session()
        .selected_option()
        .map(|option| option.label.as_str())
}

#[test]
fn key_up_with_trigger_token_shows_and_highlights_first() {
    let mut store = new_store();

    let result = key_up(&mut store, Key::Char('l'), "hey @al");

    assert!(result.state_changed);
    match result.effects.as_slice() {
        [Effect::ShowList {
            entries,
            matched_token,
        }, Effect::Highlight { index: 0 }] => {
            let labels: Vec<&str> = entries.iter().map(|o| o.label.as_str()).collect();
            assert_eq!(labels, vec!["alice", "alan"]);
            assert_eq!(matched_token, "al");
        }
        other => panic!("unexpected effects: {other:?}"),
    }
    assert!(store.session().visible);
    assert_eq!(selected_label(&store), Some("alice"));
}

#[test]
fn scenario_navigate_and_commit() {
    let mut store = new_store();
    key_up(&mut store, Key::Char('l'), "hey @al");

    let result = key_down(&mut store, Key::Down, "hey @al");
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::Highlight { index: 1 }, Effect::CancelDefault]
    ));
    assert_eq!(selected_label(&store), Some("alan"));

    let result = key_down(&mut store, Key::Enter, "hey @al");
    assert_eq!(
        result.effects[..3],
        [
            Effect::ReplaceRange {
                from: 4,
                to: 7,
                text: "@alan ".to_string(),
            },
            Effect::SetCaret { offset: 10 },
            Effect::HideList,
        ]
    );
    assert!(matches!(
        &result.effects[3..],
        [Effect::Focus, Effect::OptionSelected { .. }, Effect::CancelDefault]
    ));
    assert!(!store.session().visible);
    assert!(store.session().cancel_enter);
}

#[test]
fn key_press_enter_after_commit_is_cancelled_once() {
    let mut store = new_store();
    key_up(&mut store, Key::Char('b'), "@b");
    key_down(&mut store, Key::Enter, "@b");

    let result = store.dispatch(Action::KeyPress { key: Key::Enter });
    assert!(matches!(result.effects.as_slice(), [Effect::CancelDefault]));

    let result = store.dispatch(Action::KeyPress { key: Key::Enter });
    assert!(result.effects.is_empty());
    assert!(!result.state_changed);
}

#[test]
fn key_up_enter_after_commit_does_not_reopen() {
    let mut store = new_store();
    key_up(&mut store, Key::Char('b'), "@b");
    key_down(&mut store, Key::Enter, "@b");

    let result = key_up(&mut store, Key::Enter, "@bob ");
    assert!(result.effects.is_empty());
    assert!(!store.session().visible);
}

#[test]
fn up_from_first_wraps_to_last() {
    let mut store = new_store();
    key_up(&mut store, Key::Char('a'), "@a");

    key_down(&mut store, Key::Up, "@a");
    assert_eq!(selected_label(&store), Some("alan"));
    key_down(&mut store, Key::Down, "@a");
    assert_eq!(selected_label(&store), Some("alice"));
}

#[test]
fn arrow_key_up_while_visible_does_not_refilter() {
    let mut store = new_store();
    key_up(&mut store, Key::Char('a'), "@a");
    key_down(&mut store, Key::Down, "@a");

    let result = key_up(&mut store, Key::Down, "@a");
    assert!(result.effects.is_empty());
    assert_eq!(selected_label(&store), Some("alan"));
}

#[test]
fn no_matches_hides_list() {
    let mut store = new_store();
    key_up(&mut store, Key::Char('a'), "@a");

    let result = key_up(&mut store, Key::Char('z'), "@az");
    assert!(matches!(result.effects.as_slice(), [Effect::HideList]));
    assert!(!store.session().visible);
    assert!(store.session().is_empty());
}

#[test]
fn non_trigger_word_hides_list() {
    let mut store = new_store();
    key_up(&mut store, Key::Char('a'), "@a");

    let result = key_up(&mut store, Key::Char(' '), "@a ");
    assert!(matches!(result.effects.as_slice(), [Effect::HideList]));
}

#[test]
fn hiding_twice_is_harmless() {
    let mut store = new_store();
    let result = store.dispatch(Action::EditorClick);
    assert!(result.effects.is_empty());
    assert!(!result.state_changed);

    key_up(&mut store, Key::Char('a'), "@a");
    let result = store.dispatch(Action::EditorClick);
    assert!(matches!(result.effects.as_slice(), [Effect::HideList]));
    let result = store.dispatch(Action::EditorClick);
    assert!(result.effects.is_empty());
}

#[test]
fn escape_hides_and_cancels_default() {
    let mut store = new_store();
    key_up(&mut store, Key::Char('a'), "@a");

    let result = key_down(&mut store, Key::Escape, "@a");
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::HideList, Effect::CancelDefault]
    ));

    let result = key_up(&mut store, Key::Escape, "@a");
    assert!(result.effects.is_empty());
}

#[test]
fn key_down_while_hidden_is_ignored() {
    let mut store = new_store();
    let result = key_down(&mut store, Key::Enter, "@a");
    assert!(result.effects.is_empty());
    assert!(!store.session().cancel_enter);
}

#[test]
fn hover_moves_highlight() {
    let mut store = new_store();
    key_up(&mut store, Key::Char('a'), "@a");

    let result = store.dispatch(Action::HoverItem { index: 1 });
    assert!(matches!(result.effects.as_slice(), [Effect::Highlight { index: 1 }]));

    let result = store.dispatch(Action::HoverItem { index: 7 });
    assert!(result.effects.is_empty());
}

#[test]
fn click_item_commits_that_item() {
    let mut store = new_store();
    key_up(&mut store, Key::Char('a'), "x @a");

    let result = store.dispatch(Action::ClickItem {
        index: 1,
        caret: CaretSnapshot::at_end("x @a"),
    });
    assert_eq!(
        result.effects[0],
        Effect::ReplaceRange {
            from: 2,
            to: 4,
            text: "@alan ".to_string(),
        }
    );
    assert!(!store.session().cancel_enter);
}

#[test]
fn blur_hides_after_grace_delay() {
    let mut store = new_store();
    key_up(&mut store, Key::Char('a'), "@a");

    let now = Instant::now();
    store.dispatch(Action::Blur { now });

    let result = store.dispatch(Action::Tick {
        now: now + Duration::from_millis(100),
    });
    assert!(result.effects.is_empty());
    assert!(store.session().visible);

    let result = store.dispatch(Action::Tick {
        now: now + Duration::from_millis(500),
    });
    assert!(matches!(result.effects.as_slice(), [Effect::HideList]));
    assert!(!store.session().visible);
}

#[test]
fn click_inside_grace_window_cancels_pending_hide() {
    let mut store = new_store();
    key_up(&mut store, Key::Char('a'), "@a");

    let now = Instant::now();
    store.dispatch(Action::Blur { now });
    let result = store.dispatch(Action::ClickItem {
        index: 0,
        caret: CaretSnapshot::at_end("@a"),
    });
    assert!(result.effects.contains(&Effect::HideList));
    assert!(store.session().hide_deadline.is_none());

    key_up(&mut store, Key::Char('b'), "@alice @b");
    let result = store.dispatch(Action::Tick {
        now: now + Duration::from_secs(1),
    });
    assert!(result.effects.is_empty());
    assert!(store.session().visible);
}

#[test]
fn reopening_list_clears_pending_hide() {
    let mut store = new_store();
    key_up(&mut store, Key::Char('a'), "@a");
    let now = Instant::now();
    store.dispatch(Action::Blur { now });

    key_up(&mut store, Key::Char('l'), "@al");
    assert!(store.session().hide_deadline.is_none());
}

#[test]
fn blur_while_hidden_schedules_nothing() {
    let mut store = new_store();
    let result = store.dispatch(Action::Blur {
        now: Instant::now(),
    });
    assert!(!result.state_changed);
    assert!(store.session().hide_deadline.is_none());
}

#[test]
fn unique_match_is_reported() {
    let mut store = new_store();
    let result = key_up(&mut store, Key::Char('o'), "@bo");
    assert!(matches!(
        result.effects.last(),
        Some(Effect::UniqueMatch { option }) if option.label == "bob"
    ));
}

#[test]
fn custom_matcher_receives_token_without_trigger() {
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = seen.clone();
    let config = AutocompleteConfig::default()
        .with_delimiters(DelimiterSet::from_codes(&[32]))
        .with_matcher(move |token| {
            assert_eq!(token, "Wi");
            counter.fetch_add(1, Ordering::Relaxed);
            vec![
                AutocompleteOption::new("Wilma"),
                AutocompleteOption::new("Winston"),
            ]
        });
    let mut store = Store::new(config);

    key_up(&mut store, Key::Char('i'), "cc @Wi");
    assert_eq!(seen.load(Ordering::Relaxed), 1);
    assert_eq!(store.session().len(), 2);
}

#[test]
fn min_length_mode_activates_without_trigger() {
    let config = AutocompleteConfig::default()
        .with_delimiters(DelimiterSet::from_codes(&[32]))
        .with_trigger(None)
        .with_options(["alice", "alan", "bob"]);
    let mut store = Store::new(config);

    let result = key_up(&mut store, Key::Char('l'), "hi al");
    assert!(result.effects.is_empty());
    assert!(!store.session().visible);

    key_up(&mut store, Key::Char('i'), "hi ali");
    assert_eq!(selected_label(&store), Some("alice"));

    let result = key_down(&mut store, Key::Enter, "hi ali");
    assert_eq!(
        result.effects[0],
        Effect::ReplaceRange {
            from: 3,
            to: 6,
            text: "alice ".to_string(),
        }
    );
}

#[test]
fn enclosing_text_is_inserted_once() {
    let config = AutocompleteConfig::default()
        .with_delimiters(DelimiterSet::from_codes(&[32]))
        .with_options(["alice"])
        .with_enclosing_text("end");
    let mut store = Store::new(config);

    key_up(&mut store, Key::Char('a'), "@a");
    let result = key_down(&mut store, Key::Enter, "@a");
    assert_eq!(
        result.effects[..2],
        [
            Effect::ReplaceRange {
                from: 0,
                to: 2,
                text: "@alice  @end".to_string(),
            },
            Effect::SetCaret { offset: 7 },
        ]
    );

    let editing = CaretSnapshot::new("@a @end", 2);
    store.dispatch(Action::KeyUp {
        key: Key::Char('a'),
        caret: editing.clone(),
    });
    let result = store.dispatch(Action::KeyDown {
        key: Key::Enter,
        caret: editing,
    });
    assert_eq!(
        result.effects[0],
        Effect::ReplaceRange {
            from: 0,
            to: 2,
            text: "@alice ".to_string(),
        }
    );
}
