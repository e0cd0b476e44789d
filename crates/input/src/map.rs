//! Key mapping from terminal events to board commands.

use crate::types::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keyboard-level commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardCommand {
    /// Move the keyboard cursor one slot
    MoveCursor(Direction),
    /// Swap the piece under the cursor with its neighbour
    SwapToward(Direction),
    /// Press on the piece under the cursor (select / deselect)
    Select,
    Reset,
    ToggleMode,
    ToggleAnimations,
}

/// Map keyboard input to board commands.
///
/// Plain arrows / hjkl / wasd move the cursor; with Shift they swap.
pub fn handle_key_event(key: KeyEvent) -> Option<BoardCommand> {
    let shifted = key.modifiers.contains(KeyModifiers::SHIFT);
    let direction = match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Some((Direction::Left, shifted)),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some((Direction::Right, shifted)),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some((Direction::Up, shifted)),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some((Direction::Down, shifted)),

        // Terminals report Shift+letter as the uppercase letter
        KeyCode::Char('H') | KeyCode::Char('A') => Some((Direction::Left, true)),
        KeyCode::Char('L') | KeyCode::Char('D') => Some((Direction::Right, true)),
        KeyCode::Char('K') | KeyCode::Char('W') => Some((Direction::Up, true)),
        KeyCode::Char('J') | KeyCode::Char('S') => Some((Direction::Down, true)),
        _ => None,
    };

    if let Some((dir, swap)) = direction {
        return Some(if swap {
            BoardCommand::SwapToward(dir)
        } else {
            BoardCommand::MoveCursor(dir)
        });
    }

    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => Some(BoardCommand::Select),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(BoardCommand::Reset),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(BoardCommand::ToggleMode),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(BoardCommand::ToggleAnimations),
        _ => None,
    }
}

/// Check if key should quit.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
