//! Log subscriber setup
//!
//! # Usage
//!
//! The level comes from the settings file and can be overridden with
//! the `RUST_LOG` environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=equip_hotkeys::hotkeys=trace` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `<plugin dir>/logs/equip-hotkeys.log`, replaced on
//! every game launch.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::persist::LogLevel;

pub const LOG_FILE_NAME: &str = "equip-hotkeys.log";

fn filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_directive()))
}

/// Install the global subscriber with console and file output
///
/// Does nothing if a subscriber is already installed (for example when the
/// host reloads the plugin).
pub fn init(level: LogLevel) {
    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .with_filter(filter(level));

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let path = logs_dir.join(LOG_FILE_NAME);
            if let Err(e) = std::fs::remove_file(&path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    eprintln!("Warning: Could not truncate {}: {}", path.display(), e);
                }
            }
            let file_appender = tracing_appender::rolling::never(logs_dir, LOG_FILE_NAME);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(filter(level)),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    if tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("Subscriber already installed");
    }
}
