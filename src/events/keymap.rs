//! Key bindings, free of any DOM types so they can be checked on the host.

/// What a key press asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ToggleAdmin,
    CloseAdmin,
    ScrollLeft,
    ScrollRight,
}

pub fn action_for(key: &str, ctrl: bool, shift: bool) -> Option<KeyAction> {
    match key {
        "d" | "D" if ctrl && shift => Some(KeyAction::ToggleAdmin),
        "Escape" => Some(KeyAction::CloseAdmin),
        "ArrowLeft" => Some(KeyAction::ScrollLeft),
        "ArrowRight" => Some(KeyAction::ScrollRight),
        _ => None,
    }
}
