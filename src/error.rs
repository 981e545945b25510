//! Unified error types for mispq
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from command-line validation
    #[error("{0}")]
    Usage(#[from] UsageError),

    /// Error from the MISP client
    #[error("MISP error: {0}")]
    Misp(#[from] MispError),

    /// JSON serialization error while writing results
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error (writing output)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from command-line validation
///
/// Every variant maps to a pre-network failure: when one of these is
/// returned, no configuration has been loaded and no connection opened.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// Neither -a nor -e was given
    #[error("specify either attributes (-a) or events (-e) to search for")]
    NoSearchMode,

    /// Both -a and -e were given
    #[error("cannot search for both attributes and events")]
    BothSearchModes,

    /// Configuration file does not exist or is not a regular file
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// Date parameter does not match YYYY-MM-DD
    #[error("{param} parameter expects format YYYY-MM-DD, got '{value}'")]
    InvalidDate { param: &'static str, value: String },
}

/// Errors from the MISP client layer
#[derive(Error, Debug)]
pub enum MispError {
    /// Config file could not be read
    #[error("failed to read configuration {path}: {source}")]
    ConfigRead {
        path: String,
        source: std::io::Error,
    },

    /// Config file could not be parsed
    #[error("failed to parse configuration {path}: {source}")]
    ConfigParse {
        path: String,
        source: serde_json::Error,
    },

    /// HTTP client construction failed
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    /// Request could not be sent or the response not received
    #[error("request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    /// Server answered with a non-success status
    #[error("server returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// Response body was not the expected JSON shape
    #[error("unexpected response from {url}: {message}")]
    Response { url: String, message: String },
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
