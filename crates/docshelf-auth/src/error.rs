//! Authentication error types

use thiserror::Error;

/// Authentication errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("missing session cookie")]
    MissingSession,

    #[error("malformed session token")]
    MalformedToken,
}
