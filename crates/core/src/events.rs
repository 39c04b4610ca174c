//! Push notifications for collaborators
//!
//! The session queues [`GameEvent`]s while it mutates state; a driver drains
//! them after the command completes and hands each to a [`GameObserver`]. The
//! observer therefore never runs in the middle of a state change.

use crate::types::{GameEvent, RowsCleared};

/// Receiver for session notifications. Every method defaults to a no-op.
pub trait GameObserver {
    fn on_score_changed(&mut self, _score: u32) {}

    fn on_rows_cleared(&mut self, _rows: &RowsCleared) {}

    fn on_game_over(&mut self, _final_score: u32) {}
}

/// Route one event to the matching observer method.
pub fn dispatch<O: GameObserver + ?Sized>(event: &GameEvent, observer: &mut O) {
    match event {
        GameEvent::ScoreChanged(score) => observer.on_score_changed(*score),
        GameEvent::RowsCleared(rows) => observer.on_rows_cleared(rows),
        GameEvent::GameOver { final_score } => observer.on_game_over(*final_score),
    }
}

/// Recording observer, handy for tests and headless runs.
impl GameObserver for Vec<GameEvent> {
    fn on_score_changed(&mut self, score: u32) {
        self.push(GameEvent::ScoreChanged(score));
    }

    fn on_rows_cleared(&mut self, rows: &RowsCleared) {
        self.push(GameEvent::RowsCleared(rows.clone()));
    }

    fn on_game_over(&mut self, final_score: u32) {
        self.push(GameEvent::GameOver { final_score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FlashHint;

    #[derive(Default)]
    struct Counter {
        scores: u32,
        clears: u32,
        overs: u32,
    }

    impl GameObserver for Counter {
        fn on_score_changed(&mut self, _score: u32) {
            self.scores += 1;
        }

        fn on_rows_cleared(&mut self, _rows: &RowsCleared) {
            self.clears += 1;
        }

        fn on_game_over(&mut self, _final_score: u32) {
            self.overs += 1;
        }
    }

    #[test]
    fn dispatch_routes_by_variant() {
        let events = [
            GameEvent::ScoreChanged(10),
            GameEvent::RowsCleared(RowsCleared {
                rows: Vec::new(),
                hint: FlashHint::default(),
            }),
            GameEvent::GameOver { final_score: 10 },
        ];
        let mut counter = Counter::default();
        for event in &events {
            dispatch(event, &mut counter);
        }
        assert_eq!((counter.scores, counter.clears, counter.overs), (1, 1, 1));
    }

    #[test]
    fn vec_observer_records_in_order() {
        let mut log: Vec<GameEvent> = Vec::new();
        dispatch(&GameEvent::ScoreChanged(0), &mut log);
        dispatch(&GameEvent::GameOver { final_score: 0 }, &mut log);
        assert_eq!(
            log,
            vec![GameEvent::ScoreChanged(0), GameEvent::GameOver { final_score: 0 }]
        );
    }
}
