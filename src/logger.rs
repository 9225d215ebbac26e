// The terminal is taken over by the game, so log records go to a file.

use std::fs::File;

use anyhow::{Context, Result};
use env_logger::{Builder, Target};

use crate::config::LoggingConfig;

pub fn init(config: &LoggingConfig) -> Result<()> {
    let file = File::create(&config.file)
        .with_context(|| format!("Failed to create log file {}", config.file.display()))?;

    Builder::new()
        .parse_filters(&config.level)
        .parse_env("RUST_LOG")
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to initialize logger")
}
