//! Docshelf authentication
//!
//! This crate provides:
//! - Static credential pair verification
//! - Reversible session token encode/decode
//! - Session cookie construction (HttpOnly, SameSite=Lax)
//! - The allow-list gate decision used by the request middleware
//!
//! The cookie itself is the full session state; there is no
//! server-side session table.

pub mod credentials;
pub mod error;
pub mod gate;
pub mod session;

pub use credentials::Credentials;
pub use error::AuthError;
pub use gate::is_public_path;
pub use session::{COOKIE_NAME, CookiePolicy, SessionToken};
