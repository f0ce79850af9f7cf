//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Re-run the whole fetch sequence
    Refresh,

    // Table navigation
    CursorUp,
    CursorDown,
    CursorFirst,
    CursorLast,
    /// Select the row under the cursor and show its chart
    SelectRow,
    ClearSelection,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, show_help: bool) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('r') | KeyCode::F(5) => Some(UiEvent::Refresh),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::CursorUp),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::CursorDown),
        KeyCode::Home | KeyCode::Char('g') => Some(UiEvent::CursorFirst),
        KeyCode::End | KeyCode::Char('G') => Some(UiEvent::CursorLast),
        KeyCode::Enter | KeyCode::Char(' ') => Some(UiEvent::SelectRow),
        KeyCode::Esc => Some(UiEvent::ClearSelection),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_basic_bindings() {
        assert_eq!(key_to_ui_event(press(KeyCode::Char('r')), false), Some(UiEvent::Refresh));
        assert_eq!(key_to_ui_event(press(KeyCode::Enter), false), Some(UiEvent::SelectRow));
        assert_eq!(key_to_ui_event(press(KeyCode::Down), false), Some(UiEvent::CursorDown));
        assert_eq!(key_to_ui_event(press(KeyCode::Esc), false), Some(UiEvent::ClearSelection));
        assert_eq!(key_to_ui_event(press(KeyCode::Char('x')), false), None);
    }

    #[test]
    fn test_help_swallows_keys() {
        assert_eq!(key_to_ui_event(press(KeyCode::Char('r')), true), Some(UiEvent::CloseHelp));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_ui_event(ctrl_c, true), Some(UiEvent::Quit));
    }

    #[test]
    fn test_release_is_ignored() {
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        assert_eq!(key_to_ui_event(key, false), None);
    }
}
