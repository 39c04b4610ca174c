//! Terminal frontend for the game loop.

use std::time::Duration;

use anyhow::Result;
use log::debug;
use tokio::time::Instant;

use crate::core::{GameObserver, GameSnapshot};
use crate::engine::Frontend;
use crate::term::{FrameBuffer, GameView, RowFlashes, TerminalRenderer, Viewport};
use crate::types::RowsCleared;

/// Draws frames to the terminal and animates cleared rows.
///
/// Does not touch terminal modes; the caller enters and leaves the alternate
/// screen around the loop.
pub struct TermFrontend {
    renderer: TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
    flashes: RowFlashes,
    origin: Instant,
}

impl TermFrontend {
    pub fn new(view: GameView) -> Self {
        Self {
            renderer: TerminalRenderer::new(),
            view,
            fb: FrameBuffer::new(0, 0),
            flashes: RowFlashes::new(),
            origin: Instant::now(),
        }
    }

    pub fn flashes(&self) -> &RowFlashes {
        &self.flashes
    }

    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

impl GameObserver for TermFrontend {
    fn on_score_changed(&mut self, score: u32) {
        // Score only returns to zero on a new game.
        if score == 0 {
            self.flashes.clear();
        }
    }

    fn on_rows_cleared(&mut self, rows: &RowsCleared) {
        debug!("flashing rows {:?}", rows.indices());
        self.flashes.push(rows, self.now_ms());
    }

    fn on_game_over(&mut self, final_score: u32) {
        debug!("game over shown final_score={final_score}");
    }
}

impl Frontend for TermFrontend {
    fn present(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        let now = self.now_ms();
        self.flashes.prune(now);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        self.view
            .render_into(snapshot, &self.flashes, now, Viewport::new(w, h), &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)
    }

    fn next_wakeup(&self) -> Option<Instant> {
        self.flashes
            .next_change(self.now_ms())
            .map(|ms| self.origin + Duration::from_millis(ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClearedRow, FlashHint};

    fn cleared() -> RowsCleared {
        RowsCleared {
            rows: vec![ClearedRow {
                index: 19,
                cells: vec![1; 12],
            }],
            hint: FlashHint::default(),
        }
    }

    #[test]
    fn test_rows_cleared_schedules_wakeup() {
        let mut frontend = TermFrontend::new(GameView::default());
        assert!(frontend.next_wakeup().is_none());
        frontend.on_rows_cleared(&cleared());
        assert!(!frontend.flashes().is_empty());
        assert!(frontend.next_wakeup().is_some());
    }

    #[test]
    fn test_new_game_drops_flashes() {
        let mut frontend = TermFrontend::new(GameView::default());
        frontend.on_rows_cleared(&cleared());
        frontend.on_score_changed(10);
        assert!(!frontend.flashes().is_empty());
        frontend.on_score_changed(0);
        assert!(frontend.flashes().is_empty());
    }
}
