//! Active-piece controller
//!
//! Tracks the falling piece and its offset into grid coordinates. Every move is
//! tentative: it is tested against the collision oracle and only committed when
//! nothing is hit.

use crate::collision::collides;
use crate::grid::Grid;
use crate::pieces::{create_piece, Piece};
use crate::types::{Cell, PieceKind};

/// Result of a shift attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    Moved,
    Blocked,
}

/// Result of placing a new piece at the spawn position
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Spawn {
    Placed(ActivePiece),
    /// The spawn position already collides; the game is over.
    Blocked(ActivePiece),
}

/// The falling piece
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    piece: Piece,
    x: i32,
    y: i32,
}

impl ActivePiece {
    pub fn new(piece: Piece, x: i32, y: i32) -> Self {
        Self { piece, x, y }
    }

    /// Top-centre position for `piece` on a grid `grid_width` columns wide.
    pub fn spawn_position(grid_width: u16, piece: &Piece) -> (i32, i32) {
        let x = i32::from(grid_width / 2) - i32::from(piece.width() / 2);
        (x, 0)
    }

    /// Create a fresh `kind` at the spawn position and test it for collision.
    pub fn spawn(grid: &Grid, kind: PieceKind) -> Spawn {
        let piece = create_piece(kind);
        let (x, y) = Self::spawn_position(grid.width(), &piece);
        let active = Self::new(piece, x, y);
        if active.collides(grid) {
            Spawn::Blocked(active)
        } else {
            Spawn::Placed(active)
        }
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn kind(&self) -> PieceKind {
        self.piece.kind()
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Occupied cells in grid coordinates as `(x, y, value)`.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.piece
            .occupied()
            .map(move |(dx, dy, v)| (self.x.saturating_add(dx), self.y.saturating_add(dy), v))
    }

    pub fn collides(&self, grid: &Grid) -> bool {
        collides(grid, &self.piece, self.x, self.y)
    }

    /// Move by `(dx, dy)` unless the new position collides.
    pub fn try_shift(&mut self, grid: &Grid, dx: i32, dy: i32) -> Shift {
        let (Some(nx), Some(ny)) = (self.x.checked_add(dx), self.y.checked_add(dy)) else {
            return Shift::Blocked;
        };
        if collides(grid, &self.piece, nx, ny) {
            return Shift::Blocked;
        }
        self.x = nx;
        self.y = ny;
        Shift::Moved
    }

    /// Move up by `rows` after that many rows were cleared beneath the piece.
    pub fn shift_up(&mut self, rows: usize) {
        let rows = i32::try_from(rows).unwrap_or(i32::MAX);
        self.y = self.y.saturating_sub(rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_position_is_top_centre() {
        let t = create_piece(PieceKind::T);
        let o = create_piece(PieceKind::O);
        assert_eq!(ActivePiece::spawn_position(12, &t), (5, 0));
        assert_eq!(ActivePiece::spawn_position(12, &o), (5, 0));
        assert_eq!(ActivePiece::spawn_position(10, &t), (4, 0));
    }

    #[test]
    fn spawn_on_empty_grid_is_placed() {
        let grid = Grid::new(12, 20).unwrap();
        match ActivePiece::spawn(&grid, PieceKind::T) {
            Spawn::Placed(p) => {
                assert_eq!((p.x(), p.y()), (5, 0));
                assert_eq!(p.kind(), PieceKind::T);
            }
            Spawn::Blocked(_) => panic!("spawn should succeed on empty grid"),
        }
    }

    #[test]
    fn spawn_into_filled_cells_is_blocked() {
        let mut grid = Grid::new(12, 20).unwrap();
        grid.set(5, 0, 1).unwrap();
        assert!(matches!(ActivePiece::spawn(&grid, PieceKind::O), Spawn::Blocked(_)));
        // T's top matrix row is empty, so (5, 0) alone does not block it.
        assert!(matches!(ActivePiece::spawn(&grid, PieceKind::T), Spawn::Placed(_)));
    }

    #[test]
    fn blocked_shift_reverts() {
        let grid = Grid::new(12, 20).unwrap();
        let mut p = ActivePiece::new(create_piece(PieceKind::O), 0, 0);
        assert_eq!(p.try_shift(&grid, -1, 0), Shift::Blocked);
        assert_eq!((p.x(), p.y()), (0, 0));
        assert_eq!(p.try_shift(&grid, 1, 0), Shift::Moved);
        assert_eq!((p.x(), p.y()), (1, 0));
    }

    #[test]
    fn shift_stops_at_floor() {
        let grid = Grid::new(12, 20).unwrap();
        let mut p = ActivePiece::new(create_piece(PieceKind::O), 5, 0);
        let mut moves = 0;
        while p.try_shift(&grid, 0, 1) == Shift::Moved {
            moves += 1;
        }
        assert_eq!(moves, 18);
        assert_eq!(p.y(), 18);
    }

    #[test]
    fn cells_are_in_grid_coordinates() {
        let p = ActivePiece::new(create_piece(PieceKind::T), 5, 17);
        let cells: Vec<(i32, i32, Cell)> = p.cells().collect();
        assert_eq!(cells, vec![(5, 18, 1), (6, 18, 1), (7, 18, 1), (6, 19, 1)]);
    }

    #[test]
    fn shift_up_moves_piece_up() {
        let mut p = ActivePiece::new(create_piece(PieceKind::O), 3, 18);
        p.shift_up(2);
        assert_eq!(p.y(), 16);
    }
}
