//! Static credential pair verification

use crate::error::AuthError;
use docshelf_common::config::AuthConfig;

/// The single expected credential pair, taken from configuration.
#[derive(Clone, Debug)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Build from the auth section of the configuration
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    /// The expected login identifier
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Verify a submitted pair. The identifier is compared
    /// case-insensitively, the password exactly.
    pub fn verify(&self, username: &str, password: &str) -> Result<(), AuthError> {
        if username.eq_ignore_ascii_case(&self.username) && password == self.password {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}
