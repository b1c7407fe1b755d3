use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::terminal::screen::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,

    // list screen
    Refresh,
    Delete,
    Compose,
    Reply,
    Open,
    Up,
    Down,
    ScrollUp,
    ScrollDown,

    // form screens
    Send,
    Cancel,
    NextField,
    PrevField,
    Activate,
    Input(char),
    Backspace,
}

/// Footer hints for the list screen: (key, label).
pub const LIST_HINTS: &[(&str, &str)] = &[
    ("r", "Refresh"),
    ("d", "Delete"),
    ("o", "Compose Email"),
    ("p", "Reply"),
    ("Enter", "Read"),
    ("q", "Quit"),
];

pub const FORM_HINTS: &[(&str, &str)] = &[
    ("C-s", "Send"),
    ("Esc", "Cancel"),
    ("Tab", "Next field"),
];

pub fn action_for(screen: Screen, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    if screen.is_form() {
        form_action(key)
    } else {
        list_action(key)
    }
}

fn list_action(key: KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('d') => Action::Delete,
        KeyCode::Char('o') => Action::Compose,
        KeyCode::Char('p') => Action::Reply,
        KeyCode::Enter => Action::Open,
        KeyCode::Up | KeyCode::Char('k') => Action::Up,
        KeyCode::Down | KeyCode::Char('j') => Action::Down,
        KeyCode::PageUp => Action::ScrollUp,
        KeyCode::PageDown => Action::ScrollDown,
        _ => return None,
    };
    Some(action)
}

fn form_action(key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let action = match key.code {
        KeyCode::Char('s') if ctrl => Action::Send,
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Tab | KeyCode::Down => Action::NextField,
        KeyCode::BackTab | KeyCode::Up => Action::PrevField,
        KeyCode::Enter => Action::Activate,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) => Action::Input(c),
        _ => return None,
    };
    Some(action)
}
