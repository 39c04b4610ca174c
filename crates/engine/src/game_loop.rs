//! The driver: one task that owns the session.
//!
//! Player input arrives over a channel, gravity comes from the
//! [`TickSchedule`], and both are turned into [`GameCommand`]s applied in
//! arrival order. Nothing else touches the session, so commands never
//! interleave.

use anyhow::Result;
use log::{debug, info};
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

use blockfall_core::{GameSession, GameSnapshot, StepOutcome};
use blockfall_types::{GameCommand, GamePhase};

use crate::frontend::Frontend;
use crate::schedule::TickSchedule;

/// Messages accepted by [`GameLoop::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopInput {
    Command(GameCommand),
    /// Redraw without changing state (e.g. after a terminal resize).
    Redraw,
    Quit,
}

impl From<GameCommand> for LoopInput {
    fn from(command: GameCommand) -> Self {
        LoopInput::Command(command)
    }
}

/// Counters for the debug log on shutdown.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoopStats {
    pub commands: u64,
    pub ticks: u64,
    pub frames: u64,
}

pub struct GameLoop<F: Frontend> {
    session: GameSession,
    schedule: TickSchedule,
    frontend: F,
    frame: GameSnapshot,
    stats: LoopStats,
}

impl<F: Frontend> GameLoop<F> {
    pub fn new(session: GameSession, frontend: F) -> Self {
        let schedule = TickSchedule::new(session.config().tick_interval());
        Self {
            session,
            schedule,
            frontend,
            frame: GameSnapshot::default(),
            stats: LoopStats::default(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn schedule(&self) -> &TickSchedule {
        &self.schedule
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    pub fn into_parts(self) -> (GameSession, F) {
        (self.session, self.frontend)
    }

    /// Apply one command at time `now`, notify the frontend and redraw.
    pub fn handle(&mut self, command: GameCommand, now: Instant) -> Result<StepOutcome> {
        let outcome = self.session.apply_command(command);
        self.stats.commands += 1;
        debug!("command {} -> {:?}", command.as_str(), outcome);

        if command == GameCommand::Start && self.session.phase().is_running() {
            self.schedule.restart(now);
        }
        if self.session.phase() != GamePhase::Running && self.schedule.is_armed() {
            self.schedule.cancel();
            debug!("tick schedule cancelled phase={}", self.session.phase().as_str());
        }

        self.session.dispatch_events(&mut self.frontend);
        self.present()?;
        Ok(outcome)
    }

    /// Fire a gravity tick if one is due at `now`.
    pub fn tick_due(&mut self, now: Instant) -> Result<Option<StepOutcome>> {
        if !self.schedule.fire(now) {
            return Ok(None);
        }
        self.stats.ticks += 1;
        self.handle(GameCommand::Tick, now).map(Some)
    }

    /// Redraw the current state.
    pub fn present(&mut self) -> Result<()> {
        self.session.snapshot_into(&mut self.frame);
        self.stats.frames += 1;
        self.frontend.present(&self.frame)
    }

    /// Run until [`LoopInput::Quit`] arrives or every sender is dropped.
    ///
    /// Returns the frontend so callers can tear it down or inspect it.
    pub async fn run(mut self, mut inputs: mpsc::Receiver<LoopInput>) -> Result<F> {
        info!(
            "game loop started grid={}x{} tick={:?}",
            self.session.grid().width(),
            self.session.grid().height(),
            self.schedule.period()
        );
        self.present()?;

        loop {
            let tick_at = self.schedule.deadline();
            let wake_at = self.frontend.next_wakeup();

            tokio::select! {
                biased;

                input = inputs.recv() => match input {
                    Some(LoopInput::Command(command)) => {
                        self.handle(command, Instant::now())?;
                    }
                    Some(LoopInput::Redraw) => self.present()?,
                    Some(LoopInput::Quit) | None => break,
                },
                _ = sleep_until_some(tick_at), if tick_at.is_some() => {
                    self.tick_due(Instant::now())?;
                }
                _ = sleep_until_some(wake_at), if wake_at.is_some() => {
                    self.present()?;
                }
            }
        }

        info!(
            "game loop stopped commands={} ticks={} frames={} score={}",
            self.stats.commands,
            self.stats.ticks,
            self.stats.frames,
            self.session.score()
        );
        Ok(self.frontend)
    }
}

async fn sleep_until_some(at: Option<Instant>) {
    match at {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}
