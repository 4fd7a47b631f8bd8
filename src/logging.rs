//! Logging setup
//!
//! The terminal belongs to the UI, so logs go to a daily rolling file under
//! the log directory. `RUST_LOG` overrides the configured filter.

use std::panic;

use tracing::error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::paths::FinancesPaths;

/// Install the global subscriber
///
/// The returned guard flushes buffered lines on drop and must live for the
/// rest of the program.
pub fn init(paths: &FinancesPaths, default_filter: &str) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(paths.log_dir())?;

    let file_appender = RollingFileAppender::new(
        Rotation::DAILY,
        paths.log_dir(),
        format!("finances-{}.log", env!("CARGO_PKG_VERSION")),
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(non_blocking);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(env_filter)
        .try_init()?;

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        error!("finances panicked: {}", panic_info);
        original_hook(panic_info);
    }));

    Ok(guard)
}
