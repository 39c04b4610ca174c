//! Grid tests - merge and row clearing

use blockfall::core::{ActivePiece, CoreError, Grid, Piece};
use blockfall::types::{Cell, PieceKind, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH};

fn fill_row(grid: &mut Grid, y: i32, value: Cell) {
    for x in 0..grid.width() as i32 {
        grid.set(x, y, value).unwrap();
    }
}

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new(DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT).unwrap();
    assert_eq!(grid.width(), 12);
    assert_eq!(grid.height(), 20);

    for y in 0..20 {
        for x in 0..12 {
            assert_eq!(grid.get(x, y), Some(0), "cell ({}, {}) should be empty", x, y);
        }
    }
}

#[test]
fn test_grid_get_out_of_bounds() {
    let grid = Grid::default();
    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, -1), None);
    assert_eq!(grid.get(12, 0), None);
    assert_eq!(grid.get(0, 20), None);
}

#[test]
fn test_grid_set_and_get() {
    let mut grid = Grid::default();
    grid.set(5, 10, 1).unwrap();
    assert_eq!(grid.get(5, 10), Some(1));
    assert!(grid.is_occupied(5, 10));
    grid.set(5, 10, 0).unwrap();
    assert!(grid.is_free(5, 10));
}

#[test]
fn test_grid_set_out_of_bounds() {
    let mut grid = Grid::default();
    assert_eq!(grid.set(12, 0, 1), Err(CoreError::OutOfBounds { x: 12, y: 0 }));
    assert_eq!(grid.set(0, 20, 1), Err(CoreError::OutOfBounds { x: 0, y: 20 }));
}

#[test]
fn test_clear_with_no_full_rows_is_a_no_op() {
    let mut grid = Grid::default();
    for x in 0..11 {
        grid.set(x, 19, 2).unwrap();
    }
    grid.set(3, 7, 1).unwrap();
    let before = grid.clone();

    assert!(grid.clear_full_rows().is_empty());
    assert_eq!(grid, before);
}

#[test]
fn test_clear_bottom_two_rows() {
    let mut grid = Grid::default();
    fill_row(&mut grid, 19, 1);
    fill_row(&mut grid, 18, 2);
    grid.set(4, 17, 1).unwrap();

    let cleared = grid.clear_full_rows();
    assert_eq!(cleared.len(), 2);
    assert_eq!(cleared.iter().map(|r| r.index).collect::<Vec<_>>(), vec![19, 18]);

    assert_eq!(grid.rows().count(), 20);
    assert!(grid.row(0).unwrap().iter().all(|&c| c == 0));
    assert!(grid.row(1).unwrap().iter().all(|&c| c == 0));
    assert_eq!(grid.get(4, 19), Some(1));
    assert_eq!(grid.cells().iter().filter(|&&c| c != 0).count(), 1);
}

#[test]
fn test_clear_non_contiguous_rows() {
    let mut grid = Grid::default();
    fill_row(&mut grid, 19, 1);
    grid.set(0, 18, 2).unwrap();
    fill_row(&mut grid, 17, 1);
    grid.set(11, 16, 2).unwrap();

    let cleared = grid.clear_full_rows();
    assert_eq!(cleared.iter().map(|r| r.index).collect::<Vec<_>>(), vec![19, 17]);
    // Survivors drop by the number of cleared rows below them.
    assert_eq!(grid.get(0, 19), Some(2));
    assert_eq!(grid.get(11, 18), Some(2));
    assert_eq!(grid.cells().iter().filter(|&&c| c != 0).count(), 2);
}

#[test]
fn test_full_top_row_is_never_cleared() {
    let mut grid = Grid::default();
    fill_row(&mut grid, 0, 1);
    fill_row(&mut grid, 19, 1);

    let cleared = grid.clear_full_rows();
    assert_eq!(cleared.len(), 1);
    // Row 0 moved down one row rather than being removed.
    assert!(grid.is_row_full(1));
    assert!(!grid.is_row_full(0));
}

#[test]
fn test_merge_writes_only_occupied_cells() {
    let mut grid = Grid::default();
    grid.set(5, 0, 2).unwrap();
    let t = ActivePiece::new(blockfall::core::create_piece(PieceKind::T), 5, 0);
    grid.merge(&t).unwrap();

    // The T's empty top row does not overwrite (5,0).
    assert_eq!(grid.get(5, 0), Some(2));
    for x in 5..=7 {
        assert_eq!(grid.get(x, 1), Some(1));
    }
    assert_eq!(grid.get(6, 2), Some(1));
}

#[test]
fn test_merge_out_of_bounds_writes_nothing() {
    let mut grid = Grid::default();
    let o = ActivePiece::new(blockfall::core::create_piece(PieceKind::O), 11, 0);
    assert_eq!(grid.merge(&o), Err(CoreError::OutOfBounds { x: 12, y: 0 }));
    assert!(grid.cells().iter().all(|&c| c == 0));
}

#[test]
fn test_single_cell_fill_clears_bottom_row() {
    let mut grid = Grid::default();
    for x in 1..12 {
        grid.set(x, 19, 2).unwrap();
    }
    let dot = Piece::from_rows(PieceKind::T, &[&[1]]).unwrap();
    grid.merge(&ActivePiece::new(dot, 0, 19)).unwrap();

    let cleared = grid.clear_full_rows();
    assert_eq!(cleared.len(), 1);
    assert_eq!(cleared[0].index, 19);
    assert!(grid.row(19).unwrap().iter().all(|&c| c == 0));
}
