//! Error types for the audit orchestrator
//!
//! Failed tests are never an error: they travel through the Summary and the
//! final exit-code decision. Errors are reserved for orchestration problems
//! (missing config, broken steps, unreadable reports).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the audit orchestrator
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file '{path}': {message}")]
    ConfigParse { path: String, message: String },

    #[error("Missing required environment variable(s): {0}")]
    MissingEnv(String),

    // === Step Errors ===
    #[error("Step '{command}' failed with exit code {code}")]
    StepFailed { command: String, code: i32 },

    // === Runner Errors ===
    #[error("Failed to spawn test runner '{command}': {message}")]
    RunnerSpawn { command: String, message: String },

    #[error("Could not find runner JSON report (looked at '{0}')")]
    ReportNotFound(PathBuf),

    #[error("Failed to parse runner report '{path}': {message}")]
    ReportParse { path: String, message: String },

    // === Smoke Check Errors ===
    #[error("RLS policy violation: {0}")]
    PolicyViolation(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a report parse error for a path
    pub fn report_parse(path: &std::path::Path, message: impl ToString) -> Self {
        Self::ReportParse {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }

    /// Process exit code this error maps to.
    ///
    /// Missing configuration and a missing report file exit 2, a failed
    /// pre/post step propagates its own exit code, everything else exits 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_)
            | Error::ConfigParse { .. }
            | Error::MissingEnv(_)
            | Error::ReportNotFound(_) => 2,
            Error::StepFailed { code, .. } => *code,
            _ => 1,
        }
    }
}
