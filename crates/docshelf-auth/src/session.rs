//! Session tokens and cookie construction
//!
//! The token is a reversible base64 encoding of
//! `<username>:<issued_at_ms>`. It is deliberately not signed: the
//! request gate only checks for cookie *presence*, a weakness
//! inherited from the original design and documented rather than
//! hardened here.

use crate::error::AuthError;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use chrono::{DateTime, TimeZone, Utc};
use docshelf_common::config::AuthConfig;
use std::time::Duration;

/// Name of the session cookie
pub const COOKIE_NAME: &str = "auth-token";

/// Decoded session token: identifier plus issuance time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionToken {
    pub username: String,
    pub issued_at: DateTime<Utc>,
}

impl SessionToken {
    /// Issue a fresh token for the given identifier
    #[must_use]
    pub fn issue(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            issued_at: Utc::now(),
        }
    }

    /// Encode as the cookie value
    #[must_use]
    pub fn encode(&self) -> String {
        let raw = format!("{}:{}", self.username, self.issued_at.timestamp_millis());
        BASE64.encode(raw)
    }

    /// Decode a cookie value back into a token. Only well-formed
    /// values round-trip; anything else is a `MalformedToken`.
    pub fn decode(value: &str) -> Result<Self, AuthError> {
        let bytes = BASE64.decode(value).map_err(|_| AuthError::MalformedToken)?;
        let raw = String::from_utf8(bytes).map_err(|_| AuthError::MalformedToken)?;
        let (username, millis) = raw.rsplit_once(':').ok_or(AuthError::MalformedToken)?;
        if username.is_empty() {
            return Err(AuthError::MalformedToken);
        }
        let millis: i64 = millis.parse().map_err(|_| AuthError::MalformedToken)?;
        let issued_at = Utc
            .timestamp_millis_opt(millis)
            .single()
            .ok_or(AuthError::MalformedToken)?;
        Ok(Self {
            username: username.to_string(),
            issued_at,
        })
    }
}

/// Cookie attributes applied to every session cookie.
#[derive(Clone, Debug)]
pub struct CookiePolicy {
    /// Lifetime for Max-Age; `None` yields a browser-session cookie
    pub ttl: Option<Duration>,
    /// Whether to set the `Secure` attribute
    pub secure: bool,
}

impl CookiePolicy {
    /// Build from the auth section of the configuration
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            ttl: config.session_ttl_secs.map(Duration::from_secs),
            secure: config.secure_cookies,
        }
    }

    /// Render a `Set-Cookie` header value carrying the given token
    #[must_use]
    pub fn set_cookie(&self, token: &SessionToken) -> String {
        let mut cookie = format!(
            "{COOKIE_NAME}={}; Path=/; HttpOnly; SameSite=Lax",
            token.encode()
        );
        if let Some(ttl) = self.ttl {
            cookie.push_str(&format!("; Max-Age={}", ttl.as_secs()));
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let token = SessionToken::issue("Gabriela");
        let decoded = SessionToken::decode(&token.encode()).unwrap();
        assert_eq!(decoded.username, "Gabriela");
        assert_eq!(
            decoded.issued_at.timestamp_millis(),
            token.issued_at.timestamp_millis()
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(
            SessionToken::decode("not base64!!"),
            Err(AuthError::MalformedToken)
        );
        // base64, but no separator inside
        let opaque = BASE64.encode("justonefield");
        assert_eq!(SessionToken::decode(&opaque), Err(AuthError::MalformedToken));
        // separator but no millis
        let partial = BASE64.encode("user:notanumber");
        assert_eq!(
            SessionToken::decode(&partial),
            Err(AuthError::MalformedToken)
        );
    }

    #[test]
    fn test_set_cookie_with_ttl() {
        let policy = CookiePolicy {
            ttl: Some(Duration::from_secs(1800)),
            secure: false,
        };
        let cookie = policy.set_cookie(&SessionToken::issue("admin"));
        assert!(cookie.starts_with("auth-token="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=1800"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_set_cookie_session_scoped() {
        let policy = CookiePolicy {
            ttl: None,
            secure: true,
        };
        let cookie = policy.set_cookie(&SessionToken::issue("admin"));
        assert!(!cookie.contains("Max-Age"));
        assert!(cookie.contains("Secure"));
    }
}
