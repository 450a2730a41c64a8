//! Common types and utilities for Docshelf
//!
//! This crate provides the shared error taxonomy, configuration
//! structures, and the document record data model used across
//! the workspace.

pub mod config;
pub mod error;
pub mod record;

pub use config::{AuthConfig, BlobConfig, CatalogConfig, Config, ServerConfig};
pub use error::{Error, Result};
pub use record::{DocumentRecord, Origin};
