//! Error types for Docshelf
//!
//! This module defines the common error taxonomy used throughout the system.

use thiserror::Error;

/// Common result type for Docshelf operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for Docshelf
#[derive(Debug, Error)]
pub enum Error {
    // Catalog errors
    #[error("document not found: {0}")]
    NotFound(String),

    // Request validation errors
    #[error("validation error: {0}")]
    Validation(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    // Storage errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a not found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a forbidden error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Check if this is a not found error
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::Validation(_) => 400,

            // 403 Forbidden
            Self::Forbidden(_) => 403,

            // 404 Not Found
            Self::NotFound(_) => 404,

            // 500 Internal Server Error
            Self::Io(_) | Self::Serialization(_) | Self::Storage(_) => 500,

            // 503 Service Unavailable
            Self::Config(_) => 503,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_not_found() {
        assert!(Error::not_found("report.pdf").is_not_found());
        assert!(!Error::forbidden("local file").is_not_found());
    }

    #[test]
    fn test_error_http_status() {
        assert_eq!(Error::validation("bad type").http_status_code(), 400);
        assert_eq!(Error::forbidden("local file").http_status_code(), 403);
        assert_eq!(Error::not_found("x").http_status_code(), 404);
        assert_eq!(Error::storage("disk").http_status_code(), 500);
        assert_eq!(Error::config("no token").http_status_code(), 503);
    }
}
