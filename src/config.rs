use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::{generators::Generator, solvers::Solver};

/// Environment variable holding the log level (`error`, `warn`, `info`, `debug` or `trace`).
pub const LOG_LEVEL_ENV: &str = "MAZEWAY_LOG";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid log level in MAZEWAY_LOG: {0}")]
    InvalidLogLevel(String),
}

/// Generate a maze and watch a solver search it
#[derive(Parser, Debug, Clone, Copy, PartialEq, Eq)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Maze width in cells
    #[arg(long, default_value_t = 21)]
    pub width: u16,

    /// Maze height in cells
    #[arg(long, default_value_t = 21)]
    pub height: u16,

    /// Generation algorithm: recursive_backtracker or randomized
    #[arg(long, default_value = "recursive_backtracker")]
    pub generator: Generator,

    /// Search algorithm: dfs, bfs or astar
    #[arg(long, default_value = "dfs")]
    pub solver: Solver,

    /// Seed for maze generation. Seeds from the OS when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Milliseconds between two animation frames
    #[arg(long, default_value_t = 100)]
    pub delay_ms: u64,
}

impl Config {
    /// Time between two animation frames
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Read the log level from the value of [`LOG_LEVEL_ENV`], defaulting to `info` when unset.
pub fn log_level(value: Option<&str>) -> Result<tracing::Level, ConfigError> {
    match value {
        None => Ok(tracing::Level::INFO),
        Some(level) => level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(level.to_string())),
    }
}
