//! Runtime configuration.
//!
//! Three layers, later ones winning: built-in defaults, an optional TOML file
//! (`--config`), then individual command-line flags.
//!
//! ```toml
//! log_file = "blockfall.log"
//! debug_keys = false
//!
//! [game]
//! width = 12
//! height = 20
//! tick_ms = 1000
//! flash_ms = 500
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Deserialize;

use crate::types::{GameConfig, MAX_GRID_DIMENSION};

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "blockfall", version, about = "Falling-block puzzle in the terminal")]
pub struct Cli {
    /// TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Grid width in cells.
    #[arg(long)]
    pub width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    pub height: Option<u16>,

    /// Gravity interval in milliseconds.
    #[arg(long, value_name = "MS")]
    pub tick_ms: Option<u32>,

    /// Cleared-row flash duration in milliseconds.
    #[arg(long, value_name = "MS")]
    pub flash_ms: Option<u32>,

    /// Write logs to this file (filtered by RUST_LOG).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable the `t` / `o` keys that force a piece kind.
    #[arg(long)]
    pub debug_keys: bool,

    /// Run a comma separated command list without a terminal and print the
    /// final frame as JSON, e.g. `start,left,tick,tick`.
    #[arg(long, value_name = "COMMANDS")]
    pub headless: Option<String>,
}

/// Contents of the `--config` file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub game: GameConfig,
    pub log_file: Option<PathBuf>,
    pub debug_keys: Option<bool>,
}

impl FileConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }
}

/// Fully resolved settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub game: GameConfig,
    pub log_file: Option<PathBuf>,
    pub debug_keys: bool,
}

impl AppConfig {
    /// Resolve all layers for `cli`, reading its config file if one is named.
    pub fn load(cli: &Cli) -> Result<Self> {
        let file = match cli.config.as_deref() {
            Some(path) => FileConfig::from_path(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(file, cli)
    }

    /// Apply command-line overrides on top of `file` and validate the result.
    pub fn resolve(file: FileConfig, cli: &Cli) -> Result<Self> {
        let mut game = file.game;
        if let Some(width) = cli.width {
            game.width = width;
        }
        if let Some(height) = cli.height {
            game.height = height;
        }
        if let Some(tick_ms) = cli.tick_ms {
            game.tick_ms = tick_ms;
        }
        if let Some(flash_ms) = cli.flash_ms {
            game.flash_ms = flash_ms;
        }

        let config = Self {
            game,
            log_file: cli.log_file.clone().or(file.log_file),
            debug_keys: cli.debug_keys || file.debug_keys.unwrap_or(false),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let GameConfig {
            width,
            height,
            tick_ms,
            ..
        } = self.game;
        for (name, value) in [("width", width), ("height", height)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                bail!("{name} must be between 1 and {MAX_GRID_DIMENSION}, got {value}");
            }
        }
        if tick_ms == 0 {
            bail!("tick_ms must be positive");
        }
        Ok(())
    }
}
