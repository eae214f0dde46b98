use std::fs;
use std::path::Path;
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes console and JSON file logging under `<log_root>/logs`.
///
/// `RUST_LOG` wins when set; otherwise `verbose` switches the crate to
/// debug level. When the log directory cannot be created or opened only
/// console logging is installed and `None` is returned. The returned guard
/// must stay alive until exit so buffered lines reach the file.
pub fn init_logging(log_root: &Path, verbose: bool) -> Option<WorkerGuard> {
    let log_dir = log_root.join("logs");

    // Daily rotation, written off the main thread
    let file_appender = fs::create_dir_all(&log_dir)
        .map_err(|e| e.to_string())
        .and_then(|()| {
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("status_feeds.log")
                .build(&log_dir)
                .map_err(|e| e.to_string())
        });

    let (file_layer, guard, file_error) = match file_appender {
        Ok(appender) => {
            let (non_blocking_writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_writer(non_blocking_writer);
            (Some(layer), Some(guard), None)
        }
        Err(e) => (None, None, Some(e)),
    };

    let console_layer = fmt::layer().with_target(false).with_writer(std::io::stdout);

    let default_directives = if verbose {
        "status_feeds=debug,info"
    } else {
        "status_feeds=info,warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    // A subscriber may already be installed (tests); keep it.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    if let Some(e) = file_error {
        warn!(log_dir = %log_dir.display(), "File logging disabled: {}", e);
    }

    guard
}
