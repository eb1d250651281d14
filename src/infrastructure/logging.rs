use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::domain::{TimetableError, TimetableResult};

pub const DEFAULT_LOG_FILTER: &str = "weektable=info";

/// Installs the global tracing subscriber, appending to `log_file`.
///
/// The terminal belongs to the UI, so logs never go to stdout or stderr.
/// `RUST_LOG` overrides [`DEFAULT_LOG_FILTER`].
pub fn init_logging(log_file: &Path) -> TimetableResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| TimetableError::Config(format!("logging already initialized: {e}")))
}
