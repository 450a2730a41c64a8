//! Configuration types for Docshelf
//!
//! This module defines configuration structures used across components.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Root configuration for Docshelf
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Document catalog configuration
    pub catalog: CatalogConfig,
    /// Remote blob store configuration (absent = no remote storage)
    pub blob: Option<BlobConfig>,
}

/// HTTP server configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address for the HTTP API
    pub listen: SocketAddr,
    /// Public base URL used to build absolute, QR-encodable document links
    pub public_base_url: String,
    /// Maximum accepted upload size in bytes (default: 10 MiB)
    pub max_upload_bytes: u64,
    /// Content types accepted for upload
    pub allowed_content_types: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8080".parse().unwrap(),
            public_base_url: "http://localhost:8080".to_string(),
            max_upload_bytes: 10 * 1024 * 1024, // 10 MiB
            allowed_content_types: vec![
                "application/pdf".to_string(),
                "application/msword".to_string(),
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                    .to_string(),
                "text/plain".to_string(),
                "text/markdown".to_string(),
            ],
        }
    }
}

/// Authentication configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Expected login identifier (matched case-insensitively)
    pub username: String,
    /// Expected password (matched exactly)
    pub password: String,
    /// Session cookie lifetime in seconds; `None` yields a
    /// browser-session cookie with no Max-Age
    pub session_ttl_secs: Option<u64>,
    /// Set the `Secure` attribute on session cookies
    pub secure_cookies: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "changeme".to_string(),
            session_ttl_secs: Some(30 * 60), // 30 minutes
            secure_cookies: false,
        }
    }
}

/// Document catalog configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to the JSON catalog file
    pub db_path: PathBuf,
    /// Local directory scanned for untracked documents and served
    /// at `/documents`
    pub documents_dir: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("data/documents.json"),
            documents_dir: PathBuf::from("public/documents"),
        }
    }
}

/// Remote blob store configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlobConfig {
    /// Base URL of the blob store API
    pub endpoint: String,
    /// Bearer token for the blob store API
    pub token: String,
}
