//! Docshelf document catalog
//!
//! This crate provides:
//! - The `Catalog` trait: durable mapping from document id to record
//! - A JSON-file-backed implementation (the catalog of record)
//! - An in-memory implementation for tests and embedding
//! - Idempotent reconciliation scans that catalog untracked local
//!   files and remote blob objects

pub mod reconcile;
pub mod store;

pub use reconcile::{RemoteEntry, scan_local_documents, sync_remote_documents};
pub use store::{Catalog, JsonFileCatalog, MemoryCatalog};
