//! Core types module - shared data structures and constants
//!
//! This crate defines the plain data types used throughout the workspace.
//! Nothing here contains game rules; it is shared by the core state machine,
//! the terminal renderer, the key mapping and the loop driver.
//!
//! # Grid Dimensions
//!
//! - **Width**: 12 columns (indexed 0-11) by default
//! - **Height**: 20 rows (indexed 0-19) by default
//! - **Spawn position**: top-centre, `x = width/2 - piece_width/2`, `y = 0`
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 1000 | Gravity tick cadence |
//! | `ROW_FLASH_MS` | 500 | How long a cleared row flashes |
//! | `ROW_FLASH_STAGGER_MS` | 50 | Per-row delay before a flash starts |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameCommand, PieceKind, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//! assert_eq!(kind.next(), PieceKind::O);
//!
//! let command = GameCommand::from_str("moveLeft").unwrap();
//! assert_eq!(command, GameCommand::MoveLeft);
//!
//! assert_eq!(DEFAULT_GRID_WIDTH, 12);
//! assert_eq!(DEFAULT_GRID_HEIGHT, 20);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default grid width in cells (12 columns)
pub const DEFAULT_GRID_WIDTH: u16 = 12;

/// Default grid height in cells (20 rows)
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Largest accepted width or height.
pub const MAX_GRID_DIMENSION: u16 = 1024;

/// Gravity tick cadence in milliseconds (one row per second)
pub const TICK_MS: u32 = 1000;

/// Duration of the cleared-row flash effect
pub const ROW_FLASH_MS: u32 = 500;

/// Delay added per flashed row, so multi-row clears ripple
pub const ROW_FLASH_STAGGER_MS: u32 = 50;

/// Points awarded per cleared row
pub const SCORE_PER_ROW: u32 = 10;

/// A grid cell value: `0` is empty, anything else is the tag of the piece
/// kind that filled it.
pub type Cell = u8;

/// The empty cell value.
pub const EMPTY: Cell = 0;

/// Piece kinds known to the factory
///
/// - **T**: 3x3 matrix, bar on the middle row and a stem below it
/// - **O**: 2x2 square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    T,
    O,
}

impl PieceKind {
    pub const ALL: [PieceKind; 2] = [PieceKind::T, PieceKind::O];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("T"), Some(PieceKind::T));
    /// assert_eq!(PieceKind::from_str("o"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("z"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "t" => Some(PieceKind::T),
            "o" => Some(PieceKind::O),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::T => "t",
            PieceKind::O => "o",
        }
    }

    /// Value written into grid cells occupied by this kind.
    pub fn cell_value(&self) -> Cell {
        match self {
            PieceKind::T => 1,
            PieceKind::O => 2,
        }
    }

    /// Map a grid cell value back to the kind that produced it.
    pub fn from_cell_value(value: Cell) -> Option<Self> {
        match value {
            1 => Some(PieceKind::T),
            2 => Some(PieceKind::O),
            _ => None,
        }
    }

    /// The kind that follows this one in the strict T/O alternation.
    pub fn next(&self) -> Self {
        match self {
            PieceKind::T => PieceKind::O,
            PieceKind::O => PieceKind::T,
        }
    }
}

/// Lifecycle phase of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Created, never started.
    #[default]
    Idle,
    /// A piece is falling and commands are accepted.
    Running,
    /// Terminal until the next `Start`.
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Running => "running",
            GamePhase::GameOver => "game_over",
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, GamePhase::Running)
    }
}

/// Commands accepted by the state machine
///
/// Both the timer and the keyboard are reduced to these; the state machine
/// never sees a timer or a key event directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameCommand {
    /// Reset and start a new game (valid from any phase)
    Start,
    /// Shift the active piece one column left
    MoveLeft,
    /// Shift the active piece one column right
    MoveRight,
    /// Advance gravity by one row (also used for soft drop)
    Tick,
    /// Replace the active piece with a fresh piece of the given kind
    ForcePiece(PieceKind),
}

impl GameCommand {
    /// Parse a command from its camelCase name
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::{GameCommand, PieceKind};
    ///
    /// assert_eq!(GameCommand::from_str("tick"), Some(GameCommand::Tick));
    /// assert_eq!(GameCommand::from_str("moveRight"), Some(GameCommand::MoveRight));
    /// assert_eq!(
    ///     GameCommand::from_str("forceO"),
    ///     Some(GameCommand::ForcePiece(PieceKind::O))
    /// );
    /// assert_eq!(GameCommand::from_str("rotate"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "start" => Some(GameCommand::Start),
            "moveleft" | "left" => Some(GameCommand::MoveLeft),
            "moveright" | "right" => Some(GameCommand::MoveRight),
            "tick" | "down" => Some(GameCommand::Tick),
            "forcet" => Some(GameCommand::ForcePiece(PieceKind::T)),
            "forceo" => Some(GameCommand::ForcePiece(PieceKind::O)),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::Start => "start",
            GameCommand::MoveLeft => "moveLeft",
            GameCommand::MoveRight => "moveRight",
            GameCommand::Tick => "tick",
            GameCommand::ForcePiece(PieceKind::T) => "forceT",
            GameCommand::ForcePiece(PieceKind::O) => "forceO",
        }
    }
}

/// Colour hint attached to a row-clear notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashColor {
    LightBlue,
}

/// How a collaborator should animate cleared rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlashHint {
    pub color: FlashColor,
    /// How long each row stays lit.
    pub duration_ms: u32,
    /// Extra delay before each row lights up, multiplied by the row's position
    /// in the clear (the first cleared row starts immediately).
    pub stagger_ms: u32,
}

impl Default for FlashHint {
    fn default() -> Self {
        Self {
            color: FlashColor::LightBlue,
            duration_ms: ROW_FLASH_MS,
            stagger_ms: ROW_FLASH_STAGGER_MS,
        }
    }
}

/// One removed row: its index before removal and the cells it held.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClearedRow {
    pub index: usize,
    pub cells: Vec<Cell>,
}

/// Payload of a row-clear notification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowsCleared {
    /// Cleared rows, bottom to top.
    pub rows: Vec<ClearedRow>,
    pub hint: FlashHint,
}

impl RowsCleared {
    pub fn indices(&self) -> Vec<usize> {
        self.rows.iter().map(|r| r.index).collect()
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }
}

/// Notifications produced by the state machine.
///
/// The session queues these; collaborators drain them after each command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameEvent {
    ScoreChanged(u32),
    RowsCleared(RowsCleared),
    GameOver { final_score: u32 },
}

/// Session parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    /// Gravity cadence in milliseconds.
    pub tick_ms: u32,
    /// Row flash duration in milliseconds.
    pub flash_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            tick_ms: TICK_MS,
            flash_ms: ROW_FLASH_MS,
        }
    }
}

impl GameConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.tick_ms.max(1)))
    }

    pub fn flash_hint(&self) -> FlashHint {
        FlashHint {
            duration_ms: self.flash_ms,
            ..FlashHint::default()
        }
    }
}
