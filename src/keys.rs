use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Refresh,
    Ignore,
}

/// Key bindings for the live screen.
pub fn handle_key_bindings(key_event: KeyEvent) -> KeyAction {
    if key_event.kind == KeyEventKind::Release {
        return KeyAction::Ignore;
    }

    match (key_event.code, key_event.modifiers) {
        (Char('q'), _) | (KeyCode::Esc, _) | (Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,
        (Char('r'), KeyModifiers::NONE) | (KeyCode::F(5), _) => KeyAction::Refresh,
        _ => KeyAction::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyAction {
        handle_key_bindings(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn quit_and_refresh_bindings() {
        assert_eq!(press(Char('q'), KeyModifiers::NONE), KeyAction::Quit);
        assert_eq!(press(KeyCode::Esc, KeyModifiers::NONE), KeyAction::Quit);
        assert_eq!(press(Char('c'), KeyModifiers::CONTROL), KeyAction::Quit);
        assert_eq!(press(Char('r'), KeyModifiers::NONE), KeyAction::Refresh);
        assert_eq!(press(KeyCode::F(5), KeyModifiers::NONE), KeyAction::Refresh);
        assert_eq!(press(Char('c'), KeyModifiers::NONE), KeyAction::Ignore);
        assert_eq!(press(Char('r'), KeyModifiers::CONTROL), KeyAction::Ignore);
    }

    #[test]
    fn key_releases_are_ignored() {
        let release = KeyEvent::new_with_kind_and_state(
            Char('q'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(handle_key_bindings(release), KeyAction::Ignore);
    }
}
