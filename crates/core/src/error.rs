//! Error taxonomy for the core crate.

use thiserror::Error;

/// Errors rejected at the core API boundary.
///
/// Collision checks never produce these: an out-of-bounds cell is simply a
/// collision there.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("unknown piece kind '{0}'")]
    InvalidPieceKind(String),

    #[error("cell ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i32, y: i32 },

    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("invalid piece shape: {0}")]
    InvalidShape(&'static str),
}
