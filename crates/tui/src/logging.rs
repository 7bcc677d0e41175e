use std::{fs::OpenOptions, sync::Mutex};

use tracing_subscriber::EnvFilter;

use crate::{
    config::AppConfig,
    error::{AppError, Result},
};

/// Sends tracing output to the configured log file; the terminal itself is
/// owned by the UI.
pub fn init(config: &AppConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    let filter = EnvFilter::try_new(format!(
        "ledger_tui={level},client={level},ledger={level}",
        level = config.log_level
    ))
    .map_err(|err| AppError::Logging(err.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))?;

    tracing::info!(base_url = %config.base_url, "ledger_tui starting");
    Ok(())
}
