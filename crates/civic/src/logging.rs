//! Diagnostics for the `civic` binary.
//!
//! Everything goes to stderr; stdout is reserved for fingerprints, notices,
//! and records so they can be piped.

use civic_core::config::LoggingConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Effective logging settings after merging `[logging]` with CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Filter directive used when `RUST_LOG` is unset
    pub directive: String,
    pub json: bool,
}

impl LogSettings {
    /// `--verbose` raises the configured level to at least `debug`;
    /// `--json-logs` forces JSON output.
    pub fn resolve(config: &LoggingConfig, verbose: bool, json_logs: bool) -> Self {
        let level = config.level.trim().to_ascii_lowercase();
        let directive = match (verbose, level.as_str()) {
            (true, "trace") => "trace",
            (true, _) => "debug",
            (false, "") => "info",
            (false, configured) => configured,
        }
        .to_string();
        Self {
            directive,
            json: json_logs || config.format == "json",
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::try_new(&self.directive).unwrap_or_else(|_| EnvFilter::new("info"))
        })
    }
}

/// Install the global subscriber.
pub fn init(settings: &LogSettings) {
    let registry = tracing_subscriber::registry().with(settings.filter());
    if settings.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(console::colors_enabled_stderr()),
            )
            .init();
    }
}
