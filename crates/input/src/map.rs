//! Key mapping from terminal events to game commands.

use crate::types::{GameCommand, PieceKind};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Key bindings.
///
/// The piece-forcing keys are debug affordances and off unless enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyMap {
    pub debug_pieces: bool,
}

impl KeyMap {
    pub fn new(debug_pieces: bool) -> Self {
        Self { debug_pieces }
    }

    /// Map one key press. Releases are ignored.
    pub fn command(&self, key: KeyEvent) -> Option<GameCommand> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if let Some(command) = handle_key_event(key) {
            return Some(command);
        }
        if !self.debug_pieces {
            return None;
        }
        match key.code {
            KeyCode::Char('t') | KeyCode::Char('T') => Some(GameCommand::ForcePiece(PieceKind::T)),
            KeyCode::Char('o') | KeyCode::Char('O') => Some(GameCommand::ForcePiece(PieceKind::O)),
            _ => None,
        }
    }
}

/// Map keyboard input to game commands.
pub fn handle_key_event(key: KeyEvent) -> Option<GameCommand> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(GameCommand::MoveLeft),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(GameCommand::MoveRight),

        // Soft drop is one extra gravity step
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(GameCommand::Tick),

        // New game / restart
        KeyCode::Enter | KeyCode::Char('n' | 'N' | 'r' | 'R') => Some(GameCommand::Start),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
