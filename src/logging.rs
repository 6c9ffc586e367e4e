//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! The library only emits `tracing` events; the binary installs the subscriber once at
//! startup. Logs are written to stderr so stdout stays reserved for the run summary.
//!
//! # Log Levels
//!
//! - `warn`: non-fatal configuration oddities
//! - `info`: table load/write and summary counts
//! - `debug`: per-step details, swallowed coercion failures

use std::io;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Maximum level emitted when `RUST_LOG` is not consulted or unset.
    pub level_filter: LevelFilter,
    /// Whether `RUST_LOG` may override `level_filter`.
    pub use_env_filter: bool,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
    /// Output format.
    pub format: LogFormat,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for machine parsing.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_ansi: false,
            format: LogFormat::default(),
        }
    }
}

/// Initialize the global tracing subscriber writing to stderr.
///
/// Call once at startup. A second call, or a subscriber installed elsewhere, is reported as an
/// error rather than a panic.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let filter = build_env_filter(config);
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(io::stderr).with_target(true))
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(io::stderr)
                    .with_ansi(config.with_ansi)
                    .with_target(false)
                    .without_time(),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_ansi(config.with_ansi)
                    .with_target(false)
                    .without_time(),
            )
            .try_init(),
    };
    result.map_err(io::Error::other)
}

/// Build an `EnvFilter` from the configured level, respecting `RUST_LOG` when allowed.
fn build_env_filter(config: &LogConfig) -> EnvFilter {
    let fallback = || {
        // Dependencies stay at warn.
        EnvFilter::new(format!(
            "warn,csv_cleaner={level}",
            level = level_name(config.level_filter)
        ))
    };
    if config.use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}

fn level_name(filter: LevelFilter) -> String {
    filter
        .into_level()
        .map_or_else(|| "off".to_string(), |level| level.as_str().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_match_filter_directives() {
        assert_eq!(level_name(LevelFilter::OFF), "off");
        assert_eq!(level_name(LevelFilter::DEBUG), "debug");
        assert_eq!(level_name(LevelFilter::WARN), "warn");
    }
}
