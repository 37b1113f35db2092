use super::*;

fn popup(labels: &[&str]) -> PopupView {
    let mut view = PopupView::default();
    view.replace(
        labels.iter().map(|l| AutocompleteOption::new(*l)).collect(),
        "a",
    );
    view
}

#[test]
fn places_below_caret_when_it_fits() {
    let placement = place((4, 2), 10, 5, Viewport::new(80, 24));
    assert_eq!(placement.vertical, Vertical::Top(3));
    assert_eq!(placement.horizontal, Horizontal::Left(4));
}

#[test]
fn flips_to_bottom_edge_near_viewport_bottom() {
    let placement = place((4, 20), 10, 5, Viewport::new(80, 24));
    assert_eq!(placement.vertical, Vertical::Bottom(0));
    assert_eq!(placement.horizontal, Horizontal::Left(4));
}

#[test]
fn flips_to_right_edge_near_viewport_right() {
    let placement = place((75, 0), 10, 5, Viewport::new(80, 24));
    assert_eq!(placement.vertical, Vertical::Top(1));
    assert_eq!(placement.horizontal, Horizontal::Right(0));
}

#[test]
fn size_is_clamped_to_viewport() {
    let placement = place((0, 0), 200, 50, Viewport::new(40, 10));
    assert_eq!(placement.width, 40);
    assert_eq!(placement.height, 10);
}

#[test]
fn exactly_one_entry_is_selected() {
    let mut view = popup(&["alice", "alan", "bob"]);
    view.set_selected(0);
    view.set_selected(2);
    assert_eq!(view.selected(), Some(2));
    assert_eq!(view.entries().iter().filter(|e| e.selected).count(), 1);
}

#[test]
fn show_measures_widest_label() {
    let mut view = popup(&["al", "alexandria"]);
    view.show((0, 0), Viewport::new(80, 24));
    let placement = view.placement().unwrap();
    assert_eq!(placement.width, 14);
    assert_eq!(placement.height, 4);
    assert!(view.is_visible());
}

#[test]
fn render_lines_marks_selection_and_hidden_is_empty() {
    let mut view = popup(&["alice", "alan"]);
    view.set_selected(1);
    view.show((0, 0), Viewport::new(80, 24));
    assert_eq!(view.render_lines(), vec!["  alice", "> alan"]);

    view.hide();
    view.hide();
    assert!(view.render_lines().is_empty());
    assert!(view.placement().is_none());
}
