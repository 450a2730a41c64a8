//! Docshelf blob store client
//!
//! HTTP client for the remote object storage that backs uploaded
//! documents. The API shape follows the hosted blob providers: PUT an
//! object under a pathname (the store assigns a suffixed name), GET a
//! JSON listing, DELETE by URL.

pub mod client;

pub use client::{BlobClient, RemoteObject};
