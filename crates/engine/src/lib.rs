//! Loop driver for the game session.
//!
//! The core crate is synchronous and clock-free. This crate adds time: a
//! single-task tokio loop ([`GameLoop`]) that owns the session, turns the
//! gravity schedule and player input into commands, and hands notifications
//! and frames to a [`Frontend`].

pub mod frontend;
pub mod game_loop;
pub mod schedule;
pub mod script;

pub use frontend::{Frontend, Recorder};
pub use game_loop::{GameLoop, LoopInput, LoopStats};
pub use schedule::TickSchedule;
pub use script::{parse_script, run_script};
