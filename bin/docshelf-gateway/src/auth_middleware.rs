//! Session gate middleware
//!
//! Allow-listed paths (login, document viewing, the public document
//! API) pass through untouched; everything else requires the session
//! cookie and redirects to `/login` when it is absent. The gate only
//! checks cookie *presence*: token contents are not validated here,
//! an inherited weakness of the original design rather than intended
//! hardening.

use axum::{
    body::Body,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use docshelf_auth::{COOKIE_NAME, is_public_path};
use tracing::debug;

/// Extract a cookie value from the `Cookie` headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// Session gate layer
pub async fn auth_layer(request: Request<Body>, next: Next) -> Response {
    let path = request.uri().path();

    if is_public_path(path) {
        return next.run(request).await;
    }

    if cookie_value(request.headers(), COOKIE_NAME).is_none() {
        debug!(path, "no session cookie, redirecting to login");
        return Redirect::to("/login").into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, cookie.parse().unwrap());
        headers
    }

    #[test]
    fn test_cookie_value_found() {
        let headers = headers_with_cookie("auth-token=abc123; other=x");
        assert_eq!(
            cookie_value(&headers, "auth-token"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_cookie_value_absent() {
        let headers = headers_with_cookie("other=x");
        assert_eq!(cookie_value(&headers, "auth-token"), None);
    }
}
