//! Piece sequencing
//!
//! Kinds alternate strictly T, O, T, O, ... starting with T. A forced or queued
//! kind takes one slot and the alternation resumes from it.

use crate::types::PieceKind;

/// Deterministic piece order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceSequence {
    next: PieceKind,
    queued: Option<PieceKind>,
}

impl PieceSequence {
    pub const FIRST: PieceKind = PieceKind::T;

    pub fn new() -> Self {
        Self {
            next: Self::FIRST,
            queued: None,
        }
    }

    /// Kind the next `draw` will return.
    pub fn peek(&self) -> PieceKind {
        self.queued.unwrap_or(self.next)
    }

    /// Take the next kind and advance.
    pub fn draw(&mut self) -> PieceKind {
        let kind = self.queued.take().unwrap_or(self.next);
        self.next = kind.next();
        kind
    }

    /// Override only the next draw.
    pub fn queue(&mut self, kind: PieceKind) {
        self.queued = Some(kind);
    }

    /// Record that `kind` was spawned out of order.
    pub fn force(&mut self, kind: PieceKind) {
        self.queued = None;
        self.next = kind.next();
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for PieceSequence {
    fn default() -> Self {
        Self::new()
    }
}
