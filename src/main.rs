//! Terminal runner (default binary).
//!
//! Input is read on a plain thread and forwarded over a channel; the game
//! loop runs on a current-thread tokio runtime. With `--headless` the given
//! command list is applied without a terminal and the final frame is printed
//! as JSON.

use std::fs::OpenOptions;
use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;
use tokio::sync::mpsc;

use blockfall::config::{AppConfig, Cli};
use blockfall::core::GameSession;
use blockfall::engine::{parse_script, run_script, GameLoop, LoopInput, Recorder};
use blockfall::frontend::TermFrontend;
use blockfall::input::{should_quit, KeyMap};
use blockfall::term::{GameView, TerminalRenderer};

/// How often the input thread checks whether the loop has gone away.
const INPUT_POLL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli)?;
    init_logging(config.log_file.as_deref(), cli.headless.is_some())?;

    match cli.headless.as_deref() {
        Some(script) => run_headless(&config, script),
        None => run_terminal(&config),
    }
}

/// Log to a file when one is configured; stderr is only used headless, where
/// it cannot corrupt the screen.
fn init_logging(log_file: Option<&Path>, headless: bool) -> Result<()> {
    let env = env_logger::Env::default().default_filter_or("info");
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            env_logger::Builder::from_env(env)
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        None if headless => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
                .init();
        }
        None => {}
    }
    Ok(())
}

fn run_headless(config: &AppConfig, script: &str) -> Result<()> {
    let commands = parse_script(script)?;
    let mut session = GameSession::new(config.game)?;
    let mut recorder = Recorder::new();
    run_script(&mut session, &commands, &mut recorder)?;
    info!(
        "headless run commands={} events={}",
        commands.len(),
        recorder.events.len()
    );

    let snapshot = session.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn run_terminal(config: &AppConfig) -> Result<()> {
    let session = GameSession::new(config.game)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(session, KeyMap::new(config.debug_keys));

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(session: GameSession, keys: KeyMap) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    let (tx, rx) = mpsc::channel(64);
    let reader = thread::spawn(move || read_input(tx, keys));

    let game = GameLoop::new(session, TermFrontend::new(GameView::default()));
    let result = runtime.block_on(game.run(rx)).map(drop);

    // The receiver is gone now, so the reader stops at its next poll.
    match reader.join() {
        Ok(read) => result.and(read),
        Err(_) => bail!("input thread panicked"),
    }
}

fn read_input(tx: mpsc::Sender<LoopInput>, keys: KeyMap) -> Result<()> {
    while !tx.is_closed() {
        if !event::poll(INPUT_POLL)? {
            continue;
        }
        let input = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press && should_quit(key) => {
                LoopInput::Quit
            }
            Event::Key(key) => match keys.command(key) {
                Some(command) => LoopInput::Command(command),
                None => continue,
            },
            Event::Resize(..) => LoopInput::Redraw,
            _ => continue,
        };
        let quit = input == LoopInput::Quit;
        if tx.blocking_send(input).is_err() || quit {
            break;
        }
    }
    Ok(())
}
