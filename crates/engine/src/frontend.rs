//! Presentation seam between the loop and whatever shows the game.

use anyhow::Result;
use tokio::time::Instant;

use blockfall_core::{GameObserver, GameSnapshot};
use blockfall_types::{GameEvent, RowsCleared};

/// Receives notifications and frames from the [`crate::GameLoop`].
///
/// Notifications for a command are delivered before the frame that shows it.
pub trait Frontend: GameObserver {
    /// Draw one frame.
    fn present(&mut self, snapshot: &GameSnapshot) -> Result<()>;

    /// When the frontend wants to redraw on its own (e.g. a running
    /// animation). `None` means it is idle.
    fn next_wakeup(&self) -> Option<Instant> {
        None
    }
}

/// Frontend that keeps everything it receives. Used by headless runs and tests.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub events: Vec<GameEvent>,
    pub frames: usize,
    pub last: Option<GameSnapshot>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scores(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GameEvent::ScoreChanged(score) => Some(*score),
                _ => None,
            })
            .collect()
    }

    pub fn game_overs(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count()
    }
}

impl GameObserver for Recorder {
    fn on_score_changed(&mut self, score: u32) {
        self.events.on_score_changed(score);
    }

    fn on_rows_cleared(&mut self, cleared: &RowsCleared) {
        self.events.on_rows_cleared(cleared);
    }

    fn on_game_over(&mut self, final_score: u32) {
        self.events.on_game_over(final_score);
    }
}

impl Frontend for Recorder {
    fn present(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        self.frames += 1;
        match self.last.as_mut() {
            Some(last) => last.clone_from(snapshot),
            None => self.last = Some(snapshot.clone()),
        }
        Ok(())
    }
}
