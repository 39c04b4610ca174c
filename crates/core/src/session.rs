//! Game session - the state machine
//!
//! Ties the grid, the active piece, the piece sequence and the score together.
//! Everything that happens to a game arrives as a [`GameCommand`]; the session
//! itself knows nothing about timers or keys.

use log::{debug, info, warn};

use crate::active::{ActivePiece, Shift, Spawn};
use crate::error::CoreError;
use crate::events::{dispatch, GameObserver};
use crate::grid::Grid;
use crate::scoring::line_clear_score;
use crate::sequence::PieceSequence;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameCommand, GameConfig, GameEvent, GamePhase, PieceKind, RowsCleared};

/// What a command did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not applicable in the current phase.
    Ignored,
    /// The active piece moved.
    Moved,
    /// A horizontal move hit something; nothing changed.
    Blocked,
    /// The piece merged into the grid and the next one spawned.
    Locked { rows_cleared: usize },
    /// A new game started or a piece was forced in.
    Spawned,
    /// A spawn collided; the game is over.
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    active: Option<ActivePiece>,
    /// The most recently merged piece, shifted up by the rows it cleared.
    last_locked: Option<ActivePiece>,
    sequence: PieceSequence,
    phase: GamePhase,
    score: u32,
    /// Increments on every start after the first.
    episode_id: u32,
    /// Increments on every successful spawn.
    piece_id: u32,
    /// Pending notifications, drained by the driver.
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Create an idle session.
    pub fn new(config: GameConfig) -> Result<Self, CoreError> {
        let grid = Grid::new(config.width, config.height)?;
        Ok(Self {
            config,
            grid,
            active: None,
            last_locked: None,
            sequence: PieceSequence::new(),
            phase: GamePhase::Idle,
            score: 0,
            episode_id: 0,
            piece_id: 0,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for tests and debugging tools.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn last_locked(&self) -> Option<&ActivePiece> {
        self.last_locked.as_ref()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    /// Kind of the next natural spawn.
    pub fn next_kind(&self) -> PieceKind {
        self.sequence.peek()
    }

    /// Override the kind of the next natural spawn.
    pub fn queue_next(&mut self, kind: PieceKind) {
        self.sequence.queue(kind);
    }

    /// Apply one command
    pub fn apply_command(&mut self, command: GameCommand) -> StepOutcome {
        match command {
            GameCommand::Start => self.start(),
            GameCommand::MoveLeft => self.shift_horizontal(-1),
            GameCommand::MoveRight => self.shift_horizontal(1),
            GameCommand::Tick => self.tick(),
            GameCommand::ForcePiece(kind) => self.force_piece(kind),
        }
    }

    /// Reset everything and spawn the first piece. Valid from any phase.
    pub fn start(&mut self) -> StepOutcome {
        if self.phase != GamePhase::Idle {
            self.episode_id = self.episode_id.wrapping_add(1);
        }
        self.grid.clear();
        self.active = None;
        self.last_locked = None;
        self.sequence.reset();
        self.score = 0;
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::ScoreChanged(0));
        info!(
            "game start episode={} grid={}x{}",
            self.episode_id,
            self.grid.width(),
            self.grid.height()
        );

        let kind = self.sequence.draw();
        if self.spawn(kind) {
            StepOutcome::Spawned
        } else {
            StepOutcome::GameOver
        }
    }

    /// Gravity step: fall one row, or merge and respawn when blocked.
    pub fn tick(&mut self) -> StepOutcome {
        if !self.phase.is_running() {
            return StepOutcome::Ignored;
        }
        let Some(active) = self.active.as_mut() else {
            return StepOutcome::Ignored;
        };

        match active.try_shift(&self.grid, 0, 1) {
            Shift::Moved => StepOutcome::Moved,
            Shift::Blocked => self.lock_active(),
        }
    }

    pub fn move_left(&mut self) -> StepOutcome {
        self.shift_horizontal(-1)
    }

    pub fn move_right(&mut self) -> StepOutcome {
        self.shift_horizontal(1)
    }

    fn shift_horizontal(&mut self, dx: i32) -> StepOutcome {
        if !self.phase.is_running() {
            return StepOutcome::Ignored;
        }
        let Some(active) = self.active.as_mut() else {
            return StepOutcome::Ignored;
        };

        match active.try_shift(&self.grid, dx, 0) {
            Shift::Moved => StepOutcome::Moved,
            Shift::Blocked => StepOutcome::Blocked,
        }
    }

    /// Discard the active piece and spawn `kind` in its place.
    pub fn force_piece(&mut self, kind: PieceKind) -> StepOutcome {
        if !self.phase.is_running() {
            return StepOutcome::Ignored;
        }
        debug!("forcing piece kind={}", kind.as_str());
        self.sequence.force(kind);
        self.active = None;
        if self.spawn(kind) {
            StepOutcome::Spawned
        } else {
            StepOutcome::GameOver
        }
    }

    /// Merge the active piece, clear rows, score, and spawn the next piece.
    fn lock_active(&mut self) -> StepOutcome {
        let Some(mut active) = self.active.take() else {
            return StepOutcome::Ignored;
        };

        if let Err(err) = self.grid.merge(&active) {
            // Only reachable if a piece was left at an invalid position.
            warn!("merge failed kind={} error={}", active.kind().as_str(), err);
        }

        let cleared = self.grid.clear_full_rows();
        let rows_cleared = cleared.len();
        if rows_cleared > 0 {
            self.score = self.score.saturating_add(line_clear_score(rows_cleared));
            active.shift_up(rows_cleared);
            debug!(
                "rows cleared count={} rows={:?} score={}",
                rows_cleared,
                cleared.iter().map(|r| r.index).collect::<Vec<_>>(),
                self.score
            );
            self.events.push(GameEvent::RowsCleared(RowsCleared {
                rows: cleared,
                hint: self.config.flash_hint(),
            }));
            self.events.push(GameEvent::ScoreChanged(self.score));
        }
        debug!(
            "piece locked kind={} x={} y={}",
            active.kind().as_str(),
            active.x(),
            active.y()
        );
        self.last_locked = Some(active);

        let kind = self.sequence.draw();
        if self.spawn(kind) {
            StepOutcome::Locked { rows_cleared }
        } else {
            StepOutcome::GameOver
        }
    }

    /// Place a fresh piece at the top; ends the game if it collides.
    fn spawn(&mut self, kind: PieceKind) -> bool {
        match ActivePiece::spawn(&self.grid, kind) {
            Spawn::Placed(piece) => {
                debug!("spawn kind={} x={} y={}", kind.as_str(), piece.x(), piece.y());
                self.active = Some(piece);
                self.piece_id = self.piece_id.wrapping_add(1);
                true
            }
            Spawn::Blocked(_) => {
                self.end_game();
                false
            }
        }
    }

    fn end_game(&mut self) {
        self.active = None;
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
        });
        info!(
            "game over episode={} final_score={}",
            self.episode_id, self.score
        );
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Take all pending notifications, oldest first.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Drain pending notifications into `observer`.
    pub fn dispatch_events<O: GameObserver + ?Sized>(&mut self, observer: &mut O) {
        for event in self.events.drain(..) {
            dispatch(&event, observer);
        }
    }

    /// Copy the frame state into `out`, reusing its allocations.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.grid.clear();
        out.grid.extend_from_slice(self.grid.cells());
        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.next_kind = self.sequence.peek();
        out.phase = self.phase;
        out.score = self.score;
        out.episode_id = self.episode_id;
        out.piece_id = self.piece_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            config: GameConfig::default(),
            grid: Grid::default(),
            active: None,
            last_locked: None,
            sequence: PieceSequence::new(),
            phase: GamePhase::Idle,
            score: 0,
            episode_id: 0,
            piece_id: 0,
            events: Vec::new(),
        }
    }
}
