//! File logging
//!
//! The TUI owns stdout and stderr, so everything goes to a daily rolling file
//! under `<data dir>/alarmpanel/logs/`. Filtering comes from `ALARMPANEL_LOG`:
//!
//! ```bash
//! ALARMPANEL_LOG=debug alarmpanel
//! ALARMPANEL_LOG=alarmpanel_hass=trace alarmpanel
//! ```

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Result, ResultExt};

/// Environment variable holding the `EnvFilter` directives.
pub const LOG_ENV_VAR: &str = "ALARMPANEL_LOG";

const LOG_FILE_PREFIX: &str = "alarmpanel.log";
const DEFAULT_DIRECTIVES: &str = "alarmpanel=info,warn";

/// Install the global subscriber. Call once, before the terminal is taken.
pub fn init() -> Result<()> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let file_layer = fmt::layer()
        .with_writer(RollingFileAppender::new(Rotation::DAILY, &dir, LOG_FILE_PREFIX))
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(fmt::time::ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    tracing::info!(
        "Alarm Panel {} starting, logging to {}",
        env!("CARGO_PKG_VERSION"),
        dir.display()
    );
    Ok(())
}

/// Directory the rolling log files are written to.
pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("alarmpanel")
        .join("logs")
}
