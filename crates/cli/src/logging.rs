//! Tracing subscriber setup.

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{Error, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Install the global subscriber. Logs go to stderr; stdout is reserved for
/// reports.
///
/// `RUST_LOG` overrides the configured level, and `verbose` overrides both.
/// The configured level must be valid either way.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let filter = build_filter(config, verbose)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match config.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| Error::Logging(e.to_string()))
}

fn build_filter(config: &LoggingConfig, verbose: bool) -> Result<EnvFilter> {
    let level = parse_level(&config.level)?;

    if verbose {
        return Ok(EnvFilter::new("debug"));
    }
    Ok(EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into())))
}

/// Parse `logging.level`. Unlike an `EnvFilter` directive, a bare word that
/// is not a level is an error rather than a target name.
fn parse_level(level: &str) -> Result<LevelFilter> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|e| Error::Logging(format!("invalid logging.level `{level}`: {e}")))
}
