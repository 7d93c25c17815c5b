//! Logging Infrastructure
//!
//! Console output (pretty or JSON) plus an optional daily rolling file
//! under `<log_dir>/app`.

use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Create `<log_dir>/app` and return it
pub fn prepare_log_dir(log_dir: &Path) -> std::io::Result<PathBuf> {
    let app_log_dir = log_dir.join("app");
    fs::create_dir_all(&app_log_dir)?;
    Ok(app_log_dir)
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn"); `RUST_LOG` wins when set
/// * `json_format` - JSON lines instead of the human-readable format
/// * `log_dir` - Optional directory for daily rolling `app.YYYY-MM-DD` files
///
/// # Examples
/// ```no_run
/// comanda_desk::logger::init_logger_with_file("debug", false, None)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    let file_layer = match log_dir {
        Some(dir) => {
            let app_log_dir = prepare_log_dir(Path::new(dir))?;
            let app_log = RollingFileAppender::new(Rotation::DAILY, app_log_dir, "app");
            let layer = fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(app_log));
            Some(if json_format { layer.json().boxed() } else { layer.boxed() })
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;
    Ok(())
}
