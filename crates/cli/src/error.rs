//! CLI error types.

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// CLI errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Configuration could not be read or parsed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A scenario file is not a valid suite.
    #[error("failed to parse scenario file {}: {message}", path.display())]
    Scenario { path: PathBuf, message: String },

    /// No suites were given and the scenario directory holds none.
    #[error("no scenario files found in {}", dir.display())]
    NoScenarios { dir: PathBuf },

    /// At least one scenario did not produce its expected decision.
    #[error("{failed} of {total} scenarios failed")]
    ScenariosFailed { failed: usize, total: usize },

    /// At least one checked URL is unsafe.
    #[error("{count} unsafe link(s)")]
    UnsafeLinks { count: usize },

    /// The tracing subscriber could not be installed.
    #[error("failed to initialize logging: {0}")]
    Logging(String),

    /// A report could not be serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
