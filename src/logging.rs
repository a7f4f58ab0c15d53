//! Diagnostic logging through `tracing`.
//!
//! The browser runs the terminal in raw mode, so it only logs when a file is
//! given. One-shot commands fall back to stderr with a quieter default.

use std::error::Error;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directives, e.g. `SCOUTDEX_LOG=scoutdex=debug`.
pub const LOG_ENV: &str = "SCOUTDEX_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to a file; default level `info`.
    File(PathBuf),
    /// Write to stderr; default level `warn`.
    Stderr,
    Disabled,
}

impl LogTarget {
    /// `--log` wins; without it only non-interactive commands log to stderr.
    pub fn select(log_file: Option<PathBuf>, interactive: bool) -> Self {
        match log_file {
            Some(path) => LogTarget::File(path),
            None if interactive => LogTarget::Disabled,
            None => LogTarget::Stderr,
        }
    }

    fn default_directive(&self) -> &'static str {
        match self {
            LogTarget::File(_) => "info",
            LogTarget::Stderr | LogTarget::Disabled => "warn",
        }
    }
}

fn env_filter(value: Option<String>, default: &str) -> EnvFilter {
    value
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

pub fn init(target: LogTarget) -> Result<(), Box<dyn Error>> {
    let filter = env_filter(std::env::var(LOG_ENV).ok(), target.default_directive());

    match target {
        LogTarget::Disabled => Ok(()),
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()?;
            Ok(())
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()?;
            Ok(())
        }
    }
}
