//! Scripted command runs, without a clock.
//!
//! Used by the headless mode of the binary and by tests: every `tick` in the
//! script stands in for one timer firing.

use anyhow::{bail, Result};

use blockfall_core::{GameSession, StepOutcome};
use blockfall_types::GameCommand;

use crate::frontend::Frontend;

/// Parse a comma or whitespace separated command list such as
/// `"start, left, tick, forceO"`.
pub fn parse_script(script: &str) -> Result<Vec<GameCommand>> {
    let mut commands = Vec::new();
    for token in script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let Some(command) = GameCommand::from_str(token) else {
            bail!("unknown command '{}'", token);
        };
        commands.push(command);
    }
    Ok(commands)
}

/// Apply `commands` in order, delivering notifications after each one and
/// presenting the final frame.
pub fn run_script<F: Frontend + ?Sized>(
    session: &mut GameSession,
    commands: &[GameCommand],
    frontend: &mut F,
) -> Result<Vec<StepOutcome>> {
    let mut outcomes = Vec::with_capacity(commands.len());
    for &command in commands {
        outcomes.push(session.apply_command(command));
        session.dispatch_events(frontend);
    }
    frontend.present(&session.snapshot())?;
    Ok(outcomes)
}
