//! Allow-list gate decision
//!
//! Document-viewing routes stay public so QR-code links keep working
//! without a session; everything else requires the session cookie.

/// Path prefixes reachable without a session.
const PUBLIC_PREFIXES: &[&str] = &[
    "/login",
    "/api/auth/login",
    "/document/",
    "/documents/",
    "/api/documents/",
    "/health",
];

/// Whether the request path is reachable without a session cookie.
#[must_use]
pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths() {
        assert!(is_public_path("/login"));
        assert!(is_public_path("/api/auth/login"));
        assert!(is_public_path("/document/report.pdf"));
        assert!(is_public_path("/documents/report.pdf"));
        assert!(is_public_path("/api/documents/report.pdf"));
        assert!(is_public_path("/health"));
    }

    #[test]
    fn test_gated_paths() {
        assert!(!is_public_path("/"));
        assert!(!is_public_path("/api/upload"));
        assert!(!is_public_path("/api/auth/renew"));
    }
}
