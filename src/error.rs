// Error types for the core (config, token store, token manager, resolver).
// The binary and the UI wrap these in `anyhow` and only print them.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The token endpoint answered with a non-2xx status.
    #[error("Authentication failed: {status} - {body}")]
    Auth { status: StatusCode, body: String },

    /// A users endpoint answered with a non-2xx status.
    #[error("API request failed: {status} - {body}")]
    Api { status: StatusCode, body: String },

    /// The login search came back empty.
    #[error("User: {0} not found")]
    NotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Token store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, Error>;
