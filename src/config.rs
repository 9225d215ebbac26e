// Startup configuration, read once from SnakeKiller.toml.

use std::{env, fs, path::{Path, PathBuf}};

use anyhow::{bail, ensure, Context, Result};
use serde::Deserialize;

use crate::TermInt;
use crate::snake::Grid;

pub const CONFIG_FILE: &str = "SnakeKiller.toml";
pub const CONFIG_PATH_VAR: &str = "SNAKE_KILLER_CONFIG";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub board: BoardConfig,
    pub timing: TimingConfig,
    pub adversaries: AdversaryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BoardConfig {
    pub columns: TermInt,
    pub rows: TermInt,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub tick_interval_ms: u64,
    pub spawn_interval_ms: u64,
    /// How long the app sleeps between polls for input and due triggers.
    pub poll_interval_ms: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AdversaryConfig {
    /// Chance per tick that an adversary picks a new random heading.
    pub turn_probability: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: PathBuf,
    /// Filter directive; `RUST_LOG` wins when set.
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            board: BoardConfig::default(),
            timing: TimingConfig::default(),
            adversaries: AdversaryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig { columns: 40, rows: 30 }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig { tick_interval_ms: 80, spawn_interval_ms: 500, poll_interval_ms: 5 }
    }
}

impl Default for AdversaryConfig {
    fn default() -> Self {
        AdversaryConfig { turn_probability: 0.1 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig { file: PathBuf::from("snake-killer.log"), level: "info".to_string() }
    }
}

impl BoardConfig {
    pub fn grid(&self) -> Grid {
        Grid::new(self.columns, self.rows)
    }
}

impl Config {
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        Self::parse(&contents).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Reads the file named by `SNAKE_KILLER_CONFIG`, or `SnakeKiller.toml`.
    /// Only a missing default file falls back to the built-in values.
    pub fn load() -> Result<Self> {
        if let Ok(path) = env::var(CONFIG_PATH_VAR) {
            return Self::from_file(path);
        }

        if Path::new(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.board.columns > 0 && self.board.rows > 0, "board must have at least one cell");

        let t = &self.timing;
        ensure!(
            t.tick_interval_ms > 0 && t.spawn_interval_ms > 0 && t.poll_interval_ms > 0,
            "timing intervals must be at least 1 ms"
        );
        ensure!(t.poll_interval_ms <= t.tick_interval_ms, "poll interval can't exceed the tick interval");

        let p = self.adversaries.turn_probability;
        if !(0.0..=1.0).contains(&p) {
            bail!("turn_probability must be within [0, 1], got {}", p);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.board.grid(), Grid::new(40, 30));
        assert_eq!(config.timing.tick_interval_ms, 80);
        assert_eq!(config.timing.spawn_interval_ms, 500);
        assert_eq!(config.adversaries.turn_probability, 0.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse("[board]\ncolumns = 20\n").unwrap();
        assert_eq!(config.board.columns, 20);
        assert_eq!(config.board.rows, 30);
        assert_eq!(config.timing, TimingConfig::default());
    }

    #[test]
    fn test_full_file() {
        let toml = r#"
            [board]
            columns = 12
            rows = 8

            [timing]
            tick_interval_ms = 100
            spawn_interval_ms = 1000
            poll_interval_ms = 10

            [adversaries]
            turn_probability = 0.25

            [logging]
            file = "game.log"
            level = "debug"
        "#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.board.grid(), Grid::new(12, 8));
        assert_eq!(config.timing.spawn_interval_ms, 1000);
        assert_eq!(config.adversaries.turn_probability, 0.25);
        assert_eq!(config.logging.file, PathBuf::from("game.log"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(Config::parse("[board]\ncolumns = 0\n").is_err());
        assert!(Config::parse("[timing]\ntick_interval_ms = 0\n").is_err());
        assert!(Config::parse("[timing]\npoll_interval_ms = 90\n").is_err());
        assert!(Config::parse("[adversaries]\nturn_probability = 1.5\n").is_err());
        assert!(Config::parse("[board]\ncolumns = \"wide\"\n").is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(Config::from_file("does/not/exist.toml").is_err());
    }
}
