//! Pieces module - shape matrices and the piece factory
//!
//! A piece is a small immutable matrix of cell values. Every non-zero cell of a
//! factory piece holds its kind's cell value, which renderers use for colour.

use arrayvec::ArrayVec;

use crate::error::CoreError;
use crate::types::{Cell, PieceKind, EMPTY};

/// Largest side length of a piece matrix.
pub const MAX_PIECE_SIDE: usize = 4;

/// Largest number of cells in a piece matrix.
pub const MAX_PIECE_CELLS: usize = MAX_PIECE_SIDE * MAX_PIECE_SIDE;

/// T piece: bar on the middle row, stem below it
const T_SHAPE: [[Cell; 3]; 3] = [[0, 0, 0], [1, 1, 1], [0, 1, 0]];

/// O piece: 2x2 square
const O_SHAPE: [[Cell; 2]; 2] = [[2, 2], [2, 2]];

/// An immutable shape matrix plus its kind tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    width: u8,
    height: u8,
    /// Row-major matrix cells
    cells: ArrayVec<Cell, MAX_PIECE_CELLS>,
}

impl Piece {
    /// Build a piece from explicit rows (top row first).
    ///
    /// The matrix must be rectangular, at most 4x4 and contain at least one
    /// non-zero cell.
    pub fn from_rows(kind: PieceKind, rows: &[&[Cell]]) -> Result<Self, CoreError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        if height == 0 || width == 0 {
            return Err(CoreError::InvalidShape("empty matrix"));
        }
        if height > MAX_PIECE_SIDE || width > MAX_PIECE_SIDE {
            return Err(CoreError::InvalidShape("matrix larger than 4x4"));
        }
        if rows.iter().any(|row| row.len() != width) {
            return Err(CoreError::InvalidShape("ragged matrix"));
        }

        let mut cells = ArrayVec::new();
        for row in rows {
            cells.extend(row.iter().copied());
        }
        if cells.iter().all(|&c| c == EMPTY) {
            return Err(CoreError::InvalidShape("no occupied cells"));
        }

        Ok(Self {
            kind,
            width: width as u8,
            height: height as u8,
            cells,
        })
    }

    fn from_matrix<const N: usize>(kind: PieceKind, matrix: &[[Cell; N]; N]) -> Self {
        let mut cells = ArrayVec::new();
        for row in matrix {
            cells.extend(row.iter().copied());
        }
        Self {
            kind,
            width: N as u8,
            height: N as u8,
            cells,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Cell at matrix column `col`, row `row` (0 outside the matrix).
    pub fn get(&self, col: usize, row: usize) -> Cell {
        if col >= self.width as usize || row >= self.height as usize {
            return EMPTY;
        }
        self.cells[row * self.width as usize + col]
    }

    /// Matrix rows, top first.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.width as usize)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Occupied cells as `(col, row, value)` relative to the matrix origin.
    pub fn occupied(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        let w = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value != EMPTY)
            .map(move |(i, &value)| ((i % w) as i32, (i / w) as i32, value))
    }
}

/// Create a fresh piece of the given kind
pub fn create_piece(kind: PieceKind) -> Piece {
    match kind {
        PieceKind::T => Piece::from_matrix(kind, &T_SHAPE),
        PieceKind::O => Piece::from_matrix(kind, &O_SHAPE),
    }
}

/// Create a piece from a kind name such as `"T"` or `"o"`.
pub fn create_piece_named(name: &str) -> Result<Piece, CoreError> {
    PieceKind::from_str(name)
        .map(create_piece)
        .ok_or_else(|| CoreError::InvalidPieceKind(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_piece_matrix() {
        let piece = create_piece(PieceKind::T);
        assert_eq!((piece.width(), piece.height()), (3, 3));
        let rows: Vec<&[Cell]> = piece.rows().collect();
        let expected: Vec<&[Cell]> = vec![&[0, 0, 0][..], &[1, 1, 1][..], &[0, 1, 0][..]];
        assert_eq!(rows, expected);
    }

    #[test]
    fn o_piece_matrix() {
        let piece = create_piece(PieceKind::O);
        assert_eq!((piece.width(), piece.height()), (2, 2));
        assert!(piece.cells().iter().all(|&c| c == 2));
    }

    #[test]
    fn occupied_cells_carry_kind_value() {
        for kind in PieceKind::ALL {
            let piece = create_piece(kind);
            assert_eq!(piece.occupied().count(), 4);
            assert!(piece.occupied().all(|(_, _, v)| v == kind.cell_value()));
        }
    }

    #[test]
    fn t_piece_occupied_offsets() {
        let offsets: Vec<(i32, i32)> = create_piece(PieceKind::T)
            .occupied()
            .map(|(x, y, _)| (x, y))
            .collect();
        assert_eq!(offsets, vec![(0, 1), (1, 1), (2, 1), (1, 2)]);
    }

    #[test]
    fn named_factory_rejects_unknown_kinds() {
        assert_eq!(create_piece_named("t").unwrap().kind(), PieceKind::T);
        assert_eq!(create_piece_named("O").unwrap().kind(), PieceKind::O);
        assert_eq!(
            create_piece_named("Z"),
            Err(CoreError::InvalidPieceKind("Z".to_string()))
        );
    }

    #[test]
    fn from_rows_validates_shape() {
        assert!(Piece::from_rows(PieceKind::T, &[&[1]]).is_ok());
        assert!(Piece::from_rows(PieceKind::T, &[]).is_err());
        assert!(Piece::from_rows(PieceKind::T, &[&[0, 0]]).is_err());
        assert!(Piece::from_rows(PieceKind::T, &[&[1, 1], &[1]]).is_err());
        assert!(Piece::from_rows(PieceKind::T, &[&[1; 5]]).is_err());
    }
}
