//! Error types for notion-ip
//!
//! This module defines all error types used throughout the workspace.

use thiserror::Error;

/// Result type alias for notion-ip operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for notion-ip
#[derive(Error, Debug)]
pub enum Error {
    /// Required configuration is missing or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// No IP-echo service returned a usable address
    #[error("Unable to retrieve external IPv4 address: {0}")]
    ResolverExhausted(String),

    /// Reading the previously recorded address from Notion failed
    #[error("Notion read failed: {0}")]
    NotionRead(String),

    /// Writing the new address to Notion failed
    #[error("Notion write failed: {0}")]
    NotionWrite(String),

    /// No recorded address was found on the page
    #[error("Not found: {0}")]
    NotFound(String),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a resolver-exhausted error
    pub fn resolver_exhausted(msg: impl Into<String>) -> Self {
        Self::ResolverExhausted(msg.into())
    }

    /// Create a Notion read error
    pub fn notion_read(msg: impl Into<String>) -> Self {
        Self::NotionRead(msg.into())
    }

    /// Create a Notion write error
    pub fn notion_write(msg: impl Into<String>) -> Self {
        Self::NotionWrite(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Whether the process should terminate on this error.
    ///
    /// Read-side failures only mean the previous state is unknown.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::NotionRead(_) | Self::NotFound(_))
    }
}
