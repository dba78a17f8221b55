//! Structured Logger
//!
//! Wraps `tracing` with environment-based level control, an optional JSON
//! console format and an optional daily-rotated NDJSON file.

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "roaster.log";

#[derive(Debug, Clone, Copy)]
pub struct LogSettings<'a> {
    /// Fallback filter when `RUST_LOG` is unset, e.g. `info` or `roaster=debug`.
    pub level: &'a str,
    /// Emit console lines as JSON objects.
    pub json: bool,
    /// Directory for `roaster.log.YYYY-MM-DD`; `None` disables file output.
    pub log_dir: Option<&'a Path>,
}

impl Default for LogSettings<'_> {
    fn default() -> Self {
        Self {
            level: "info",
            json: false,
            log_dir: None,
        }
    }
}

/// Initialize the global logger. Later calls are no-ops.
pub fn init_logger(settings: &LogSettings<'_>) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(settings.level));

    let console_layer = if settings.json {
        fmt::layer()
            .json()
            .with_writer(std::io::stdout)
            .with_ansi(false)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(false)
            .with_ansi(true)
            .boxed()
    };

    let file_layer = settings.log_dir.map(|dir| {
        let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
        fmt::layer().json().with_writer(appender).with_ansi(false)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
}
