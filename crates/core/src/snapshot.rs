//! Pull-based frame state for renderers.
//!
//! A snapshot is a plain copy of everything a frame needs, so a renderer can
//! draw without borrowing the session.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::active::ActivePiece;
use crate::pieces::MAX_PIECE_CELLS;
use crate::types::{Cell, GamePhase, PieceKind, EMPTY};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub x: i32,
    pub y: i32,
    pub width: u8,
    pub height: u8,
    /// Row-major piece matrix.
    pub cells: ArrayVec<Cell, MAX_PIECE_CELLS>,
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(value: &ActivePiece) -> Self {
        let piece = value.piece();
        Self {
            kind: piece.kind(),
            x: value.x(),
            y: value.y(),
            width: piece.width(),
            height: piece.height(),
            cells: piece.cells().iter().copied().collect(),
        }
    }
}

impl ActiveSnapshot {
    /// Piece cell covering grid position (x, y), if any.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<Cell> {
        let (col, row) = (x.checked_sub(self.x)?, y.checked_sub(self.y)?);
        if col < 0 || row < 0 || col >= self.width as i32 || row >= self.height as i32 {
            return None;
        }
        let value = self.cells[row as usize * self.width as usize + col as usize];
        (value != EMPTY).then_some(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    /// Row-major grid cells, without the active piece.
    pub grid: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub next_kind: PieceKind,
    pub phase: GamePhase,
    pub score: u32,
    pub episode_id: u32,
    pub piece_id: u32,
}

impl GameSnapshot {
    /// Locked grid cell at (x, y); empty when out of bounds.
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        if x >= self.width as usize || y >= self.height as usize {
            return EMPTY;
        }
        self.grid[y * self.width as usize + x]
    }

    /// Grid cell with the active piece drawn over it.
    pub fn composed_cell(&self, x: usize, y: usize) -> Cell {
        self.active
            .as_ref()
            .and_then(|a| a.cell_at(x as i32, y as i32))
            .unwrap_or_else(|| self.cell(x, y))
    }

    pub fn row(&self, y: usize) -> &[Cell] {
        let w = self.width as usize;
        if y >= self.height as usize {
            return &[];
        }
        &self.grid[y * w..(y + 1) * w]
    }

    pub fn playable(&self) -> bool {
        self.phase.is_running()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            grid: Vec::new(),
            active: None,
            next_kind: PieceKind::T,
            phase: GamePhase::Idle,
            score: 0,
            episode_id: 0,
            piece_id: 0,
        }
    }
}
