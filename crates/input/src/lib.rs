//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameCommand`]s. There is no
//! key-repeat handling: the terminal's own auto-repeat produces repeated
//! presses, and each press is one command.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit, KeyMap};
