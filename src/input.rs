//! Key bindings for the in-game view.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::movement::Action;

/// Maps a key press to the in-game action bound to it.
///
/// Movement follows the usual WASD layout with the arrow keys doubling as forward, backward and
/// turn keys. Returns `None` for unbound keys.
#[must_use]
pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('w' | 'W') | KeyCode::Up => Some(Action::MoveForward),
        KeyCode::Char('s' | 'S') | KeyCode::Down => Some(Action::MoveBackward),
        KeyCode::Char('a' | 'A') => Some(Action::StrafeLeft),
        KeyCode::Char('d' | 'D') => Some(Action::StrafeRight),
        KeyCode::Left => Some(Action::RotateLeft),
        KeyCode::Right => Some(Action::RotateRight),
        KeyCode::Char('+' | '=') => Some(Action::WidenFov),
        KeyCode::Char('-' | '_') => Some(Action::NarrowFov),
        KeyCode::Char('q' | 'Q') => Some(Action::Quit),
        _ => None,
    }
}
