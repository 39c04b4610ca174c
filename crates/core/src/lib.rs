//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the grid, the piece factory, the collision oracle, the
//! active-piece controller and the session state machine. It has **no
//! dependencies** on terminals, timers or threads:
//!
//! - **Deterministic**: pieces alternate T, O, T, O, ...; no randomness
//! - **Synchronous**: every command runs to completion before returning
//! - **Observable**: the session queues [`types::GameEvent`]s and exposes
//!   pull-based [`GameSnapshot`]s
//!
//! # Module Structure
//!
//! - [`grid`]: fixed-size playfield with merging and row clearing
//! - [`pieces`]: shape matrices and the piece factory
//! - [`collision`]: the pure collision test
//! - [`active`]: the falling piece and its tentative moves
//! - [`sequence`]: the T/O alternation
//! - [`session`]: the `Idle -> Running -> GameOver` state machine
//! - [`events`]: observer trait for push notifications
//! - [`snapshot`]: frame state for renderers
//! - [`scoring`]: 10 points per cleared row
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameSession, StepOutcome};
//! use blockfall_core::types::{GameCommand, GameConfig, GamePhase};
//!
//! let mut game = GameSession::new(GameConfig::default()).unwrap();
//! game.apply_command(GameCommand::Start);
//! assert_eq!(game.phase(), GamePhase::Running);
//!
//! assert_eq!(game.apply_command(GameCommand::MoveLeft), StepOutcome::Moved);
//! assert_eq!(game.apply_command(GameCommand::Tick), StepOutcome::Moved);
//!
//! let frame = game.snapshot();
//! assert_eq!(frame.active.unwrap().y, 1);
//! ```

pub mod active;
pub mod collision;
pub mod error;
pub mod events;
pub mod grid;
pub mod pieces;
pub mod scoring;
pub mod sequence;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use active::{ActivePiece, Shift, Spawn};
pub use collision::collides;
pub use error::CoreError;
pub use events::{dispatch, GameObserver};
pub use grid::Grid;
pub use pieces::{create_piece, create_piece_named, Piece};
pub use scoring::line_clear_score;
pub use sequence::PieceSequence;
pub use session::{GameSession, StepOutcome};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
