//! blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under short names
//! (`blockfall::{core, engine, input, term, types}`) and hosts the pieces
//! only the binary needs: configuration and the terminal frontend.

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod config;
pub mod frontend;
