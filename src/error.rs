//! Error handling for the NebulaArt client core

use std::fmt;
use thiserror::Error;

/// Unified error type for the NebulaArt client core
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The API answered with a non-success status
    #[error("API error {status}: {message}")]
    Api {
        status: u16,
        message: String,
    },

    /// The API answered with a body of the wrong shape
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// A request or a bounded load did not finish in time
    #[error("Timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Persistent storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem errors from the file-backed store
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new storage error
    pub fn storage<T: fmt::Display>(msg: T) -> Self {
        Error::Storage(msg.to_string())
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Whether the error came from the network layer rather than from us
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::Api { .. } | Error::Timeout(_) | Error::UnexpectedResponse(_)
        )
    }
}
