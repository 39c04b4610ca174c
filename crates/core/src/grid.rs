//! Grid module - the fixed playfield
//!
//! The grid is `width x height` cells, stored row-major in one flat buffer.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! A cell is `0` when empty, otherwise the value of the piece kind that filled it.
//!
//! The falling piece is never stored here; it is only written in by [`Grid::merge`].

use crate::active::ActivePiece;
use crate::error::CoreError;
use crate::types::{
    Cell, ClearedRow, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, EMPTY, MAX_GRID_DIMENSION,
};

/// The playfield
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(width: u16, height: u16) -> Result<Self, CoreError> {
        if width == 0 || height == 0 || width > MAX_GRID_DIMENSION || height > MAX_GRID_DIMENSION {
            return Err(CoreError::InvalidDimensions {
                width: width as usize,
                height: height as usize,
            });
        }
        Ok(Self {
            width,
            height,
            cells: vec![EMPTY; width as usize * height as usize],
        })
    }

    /// Build a grid from explicit rows (top row first).
    pub fn from_rows(rows: &[Vec<Cell>]) -> Result<Self, CoreError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let invalid = CoreError::InvalidDimensions { width, height };
        if rows.iter().any(|row| row.len() != width) {
            return Err(invalid);
        }
        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(invalid);
        };

        let mut grid = Self::new(w, h)?;
        for (dst, src) in grid.cells.chunks_exact_mut(width).zip(rows) {
            dst.copy_from_slice(src);
        }
        Ok(grid)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> Result<(), CoreError> {
        let idx = self.index(x, y).ok_or(CoreError::OutOfBounds { x, y })?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// In bounds and empty
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        self.get(x, y) == Some(EMPTY)
    }

    /// In bounds and filled
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(v) if v != EMPTY)
    }

    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height as usize {
            return None;
        }
        let w = self.width as usize;
        Some(&self.cells[y * w..(y + 1) * w])
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.width as usize)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|&cell| cell != EMPTY))
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Write the active piece's occupied cells into the grid.
    ///
    /// Nothing is written unless every occupied cell is in bounds.
    pub fn merge(&mut self, active: &ActivePiece) -> Result<(), CoreError> {
        if let Some((x, y, _)) = active.cells().find(|&(x, y, _)| self.index(x, y).is_none()) {
            return Err(CoreError::OutOfBounds { x, y });
        }
        for (x, y, value) in active.cells() {
            self.set(x, y, value)?;
        }
        Ok(())
    }

    /// Remove every full row and drop the rows above into the gap.
    ///
    /// Rows are scanned from the bottom up; row 0 is never removed. Full rows
    /// need not be contiguous. The survivors keep their order and the same
    /// number of empty rows appear at the top. Returns the removed rows,
    /// bottom to top, with their pre-clear indices.
    pub fn clear_full_rows(&mut self) -> Vec<ClearedRow> {
        let width = self.width as usize;
        let mut cleared = Vec::new();
        let mut write_y = self.height as usize;

        for read_y in (0..self.height as usize).rev() {
            if read_y > 0 && self.is_row_full(read_y) {
                let start = read_y * width;
                cleared.push(ClearedRow {
                    index: read_y,
                    cells: self.cells[start..start + width].to_vec(),
                });
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * width;
                    self.cells.copy_within(src..src + width, write_y * width);
                }
            }
        }

        self.cells[..write_y * width].fill(EMPTY);
        cleared
    }

    /// Convert to rows for tests and debugging.
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(<[Cell]>::to_vec).collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        let (width, height) = (DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT);
        Self {
            width,
            height,
            cells: vec![EMPTY; width as usize * height as usize],
        }
    }
}
