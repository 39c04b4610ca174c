//! Cleared-row flash effect.
//!
//! When rows clear, the removed rows are painted back over their old
//! positions in the hint colour for a short while. Each row in a multi-row
//! clear starts a little later than the one below it. Times are plain
//! milliseconds from any fixed origin, so the effect is testable without a
//! clock.

use crate::types::{Cell, FlashColor, RowsCleared, EMPTY};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Flash {
    row: usize,
    cells: Vec<Cell>,
    color: FlashColor,
    start_ms: u64,
    end_ms: u64,
}

/// A row currently lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LitRow<'a> {
    pub row: usize,
    pub cells: &'a [Cell],
    pub color: FlashColor,
}

impl LitRow<'_> {
    /// Whether column `x` of the row was filled when it cleared.
    pub fn is_lit(&self, x: usize) -> bool {
        self.cells.get(x).is_some_and(|&c| c != EMPTY)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RowFlashes {
    flashes: Vec<Flash>,
}

impl RowFlashes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a flash for every row in `cleared`, starting at `now_ms`.
    pub fn push(&mut self, cleared: &RowsCleared, now_ms: u64) {
        let hint = cleared.hint;
        for (i, row) in cleared.rows.iter().enumerate() {
            let start_ms = now_ms + i as u64 * u64::from(hint.stagger_ms);
            self.flashes.push(Flash {
                row: row.index,
                cells: row.cells.clone(),
                color: hint.color,
                start_ms,
                end_ms: start_ms + u64::from(hint.duration_ms),
            });
        }
    }

    /// Rows lit at `now_ms`.
    pub fn lit(&self, now_ms: u64) -> impl Iterator<Item = LitRow<'_>> + '_ {
        self.flashes
            .iter()
            .filter(move |f| f.start_ms <= now_ms && now_ms < f.end_ms)
            .map(|f| LitRow {
                row: f.row,
                cells: &f.cells,
                color: f.color,
            })
    }

    /// Drop flashes that have finished.
    pub fn prune(&mut self, now_ms: u64) {
        self.flashes.retain(|f| now_ms < f.end_ms);
    }

    pub fn is_empty(&self) -> bool {
        self.flashes.is_empty()
    }

    pub fn clear(&mut self) {
        self.flashes.clear();
    }

    /// The next time something appears or disappears after `now_ms`.
    pub fn next_change(&self, now_ms: u64) -> Option<u64> {
        self.flashes
            .iter()
            .flat_map(|f| [f.start_ms, f.end_ms])
            .filter(|&t| t > now_ms)
            .min()
    }
}
