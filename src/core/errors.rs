/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 *
 * The primitives themselves never fail. Errors only come from the environment
 * the benchmark runs in: malformed configuration, threads that cannot be
 * spawned, and actors that panic.
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for harness runs
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Result type for report output
pub type ReportResult<T> = Result<T, ReportError>;

/// Result type for whole benchmark suites
pub type BenchResult<T> = Result<T, BenchError>;

/// Configuration errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    #[diagnostic(
        code(config::invalid_value),
        help("Expected a non-negative integer. Unset the variable to use the default.")
    )]
    InvalidValue { key: String, value: String },

    #[error("{key} out of range: {reason}")]
    #[diagnostic(
        code(config::out_of_range),
        help("Zero permits, retries or trials would never admit any actor.")
    )]
    OutOfRange { key: String, reason: String },
}

/// Harness errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum HarnessError {
    #[error("Failed to spawn actor thread: {0}")]
    #[diagnostic(
        code(harness::spawn_failed),
        help("The system may be out of threads. Lower BENCH_ACTORS and retry.")
    )]
    Spawn(String),

    #[error("Actor {actor} panicked under {primitive}")]
    #[diagnostic(
        code(harness::actor_panicked),
        help("A work unit panicked. Check the log output above for the panic message.")
    )]
    ActorPanicked { primitive: String, actor: usize },
}

/// Report output errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    #[diagnostic(code(report::io), help("Check that stdout is still open."))]
    Io(String),

    #[error("Failed to encode report: {0}")]
    #[diagnostic(code(report::encode))]
    Encode(String),
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Encode(err.to_string())
    }
}

/// Any failure of a benchmark suite
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum BenchError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Harness(#[from] HarnessError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Report(#[from] ReportError),
}

impl From<std::io::Error> for HarnessError {
    fn from(err: std::io::Error) -> Self {
        HarnessError::Spawn(err.to_string())
    }
}
