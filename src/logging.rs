use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::config::LoggingConfig;

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Initialise logging. Log lines go to stderr (and optionally a file) so that
/// stdout carries nothing but the dump.
pub fn init(config: &LoggingConfig, verbosity: u8) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(effective_level(&config.log_level, verbosity)));

    if config.log_to_file {
        let file = File::create(&config.log_file_path).map_err(|e| {
            anyhow::anyhow!("Failed to create log file {}: {}", config.log_file_path, e)
        })?;

        let file_appender = tracing_subscriber::fmt::layer()
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(Mutex::new(file));

        let stderr_appender = tracing_subscriber::fmt::layer()
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_appender)
            .with(stderr_appender)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
    }
    Ok(())
}

/// Configured level raised by one step per `-v`
pub fn effective_level(configured: &str, verbosity: u8) -> &'static str {
    let configured = configured.trim().to_ascii_lowercase();
    let base = LEVELS
        .iter()
        .position(|l| *l == configured)
        .unwrap_or(1);
    let raised = (base + verbosity as usize).min(LEVELS.len() - 1);
    LEVELS[raised]
}
