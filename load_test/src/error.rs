//! Error types for the search load test.
//!
//! Configuration errors are fatal and stop the process before any request is
//! sent. Task errors only fail the sample they belong to.

use std::path::PathBuf;

use thiserror::Error;

/// Errors detected while resolving the run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {var} is not set or empty; export a bearer token (e.g. `oc whoami -t`)")]
    MissingToken { var: String },

    #[error("token file {path} is empty")]
    EmptyTokenFile { path: PathBuf },

    #[error("failed to read token file {path}: {source}")]
    TokenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid think-time range: min {min}s is greater than max {max}s")]
    InvalidThinkTime { min: f64, max: f64 },

    #[error("invalid host URL '{host}': {reason}")]
    InvalidHost { host: String, reason: String },

    #[error("{0}")]
    Invalid(String),
}

/// Errors raised while building or sending a single task's request.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("failed to read query template {path}: {source}")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse query template {path}: {source}")]
    TemplateParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode variables: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned HTTP {status}")]
    Status { status: u16 },

    #[error("response rejected: {0}")]
    InvalidResponse(String),
}

pub type TaskResult<T> = Result<T, TaskError>;
