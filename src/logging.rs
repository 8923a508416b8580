//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Diagnostics go to stderr; command results go to stdout, so `--json`
//! output stays machine-readable.
//!
//! # Log Levels
//!
//! - `error`: fatal problems
//! - `warn`: unmatched placeholders, kept orphans, config warnings
//! - `info`: generation progress and summary counts
//! - `debug`: per-artifact planning decisions
//! - `trace`: rule-by-rule substitution counts

use std::io;

use is_terminal::IsTerminal;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable overriding the filter (`EnvFilter` syntax)
pub const LOG_ENV_VAR: &str = "HMS_SCAFFOLD_LOG";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line output
    #[default]
    Compact,
    /// One JSON object per event
    Json,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub with_ansi: bool,
    pub with_target: bool,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            with_ansi: io::stderr().is_terminal(),
            with_target: false,
            format: LogFormat::default(),
        }
    }
}

impl LogConfig {
    /// Level from the `-v` count; `quiet` wins over verbosity
    ///
    /// - quiet: error
    /// - 0: warn
    /// - 1 (`-v`): info
    /// - 2 (`-vv`): debug
    /// - 3+: trace
    #[must_use]
    pub fn from_verbosity(verbose: u8, quiet: bool) -> Self {
        let level = if quiet {
            Level::ERROR
        } else {
            match verbose {
                0 => Level::WARN,
                1 => Level::INFO,
                2 => Level::DEBUG,
                _ => Level::TRACE,
            }
        };
        Self {
            level,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        if format == LogFormat::Json {
            self.with_ansi = false;
        }
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    /// The filter directive used when `HMS_SCAFFOLD_LOG` is unset
    pub fn default_directive(&self) -> String {
        let level = self.level.as_str().to_lowercase();
        format!("warn,hms_scaffold={level}")
    }
}

/// Install the global subscriber; call once at startup
///
/// A second call is a no-op.
pub fn init_logging(config: &LogConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(io::stderr)
                    .with_target(config.with_target),
            )
            .try_init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .compact()
                    .without_time()
                    .with_writer(io::stderr)
                    .with_ansi(config.with_ansi)
                    .with_target(config.with_target),
            )
            .try_init(),
    };
    // Already initialised (tests, repeated watch cycles)
    let _ = result;
}
