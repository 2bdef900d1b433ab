// Host-side tests for the key bindings.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#[path = "../src/events/keymap.rs"]
mod keymap;

use keymap::{action_for, KeyAction};

#[test]
fn admin_toggle_needs_ctrl_and_shift() {
    assert_eq!(action_for("D", true, true), Some(KeyAction::ToggleAdmin));
    assert_eq!(action_for("d", true, true), Some(KeyAction::ToggleAdmin));
    assert_eq!(action_for("d", true, false), None);
    assert_eq!(action_for("d", false, true), None);
    assert_eq!(action_for("d", false, false), None);
}

#[test]
fn escape_closes_admin() {
    assert_eq!(action_for("Escape", false, false), Some(KeyAction::CloseAdmin));
}

#[test]
fn arrows_scroll_the_story() {
    assert_eq!(action_for("ArrowLeft", false, false), Some(KeyAction::ScrollLeft));
    assert_eq!(action_for("ArrowRight", false, false), Some(KeyAction::ScrollRight));
    assert_eq!(action_for("ArrowUp", false, false), None);
}

#[test]
fn other_keys_do_nothing() {
    for key in ["a", "1", " ", "Enter", "Shift", "Control"] {
        assert_eq!(action_for(key, false, false), None, "key {:?}", key);
    }
}
