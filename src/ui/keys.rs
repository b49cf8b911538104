use iced::keyboard::key::Named;
use iced::keyboard::Key;

use crate::state::Action;

/// Arrow key -> triage action. Everything else is ignored.
pub fn action_for(key: &Key) -> Option<Action> {
    match key {
        Key::Named(Named::ArrowRight) => Some(Action::Advance),
        Key::Named(Named::ArrowLeft) => Some(Action::Retreat),
        Key::Named(Named::ArrowDown) => Some(Action::Keep),
        Key::Named(Named::ArrowUp) => Some(Action::Unkeep),
        _ => None,
    }
}
