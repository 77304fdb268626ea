//! Tracing initialization and subscriber setup.

use super::file_writer::RotatingFileWriter;
use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber writing JSON lines to the log file.
///
/// # Level Resolution
///
/// 1. `RUST_LOG` environment variable
/// 2. `config.trace_level`
/// 3. Default: `"info"`
///
/// # File Location
///
/// `<data dir>/picsearch.log`, see [`crate::infrastructure::log_file`]. The
/// file rotates at 10 MB and keeps 3 backups.
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Returns silently if the directory cannot be created (logging is optional)
/// - Idempotent: only the first call installs a subscriber
///
/// # Example
///
/// ```no_run
/// use picsearch::observability::init_tracing;
/// use picsearch::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let log_file = crate::infrastructure::log_file(config);
    if let Some(parent) = log_file.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }

    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let writer = RotatingFileWriter::new(log_file);
    let file_layer = fmt::layer()
        .json()
        .with_ansi(false)
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(writer);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
}
