//! Key mapping from terminal events to roll commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to a roll command.
///
/// Arrow keys and vi keys (`h`/`j`/`k`/`l`) are accepted. Key releases are
/// ignored so terminals that report them do not roll twice.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(Command::Left),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(Command::Right),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(Command::Up),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(Command::Down),
        _ => None,
    }
}

/// Check if key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
