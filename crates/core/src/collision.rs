//! Collision oracle

use crate::grid::Grid;
use crate::pieces::Piece;

/// Would `piece` overlap anything if its origin sat at `(x, y)`?
///
/// Every occupied piece cell must land inside the grid on an empty cell.
/// Cells outside the grid, including offsets too large to represent, count
/// as collisions. Pure: neither argument is modified.
pub fn collides(grid: &Grid, piece: &Piece, x: i32, y: i32) -> bool {
    piece.occupied().any(|(dx, dy, _)| {
        match (x.checked_add(dx), y.checked_add(dy)) {
            (Some(gx), Some(gy)) => !grid.is_free(gx, gy),
            _ => true,
        }
    })
}
