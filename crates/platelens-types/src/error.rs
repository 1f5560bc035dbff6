//! Error types for platelens

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The vision labeler failed. Fatal to the current request, no retry.
    #[error("Upstream service {service} failed: {message}")]
    Upstream { service: &'static str, message: String },

    #[error("Transport error: {0}")]
    Transport(String),
}

impl Error {
    /// Shorthand for an upstream failure carried from an external service.
    pub fn upstream(service: &'static str, message: impl Into<String>) -> Self {
        Error::Upstream {
            service,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
