//! Persistent document catalog backed by a single JSON file.
//!
//! Every mutating call performs a full read-modify-write of the
//! backing file. There is no locking and no atomic rename: two
//! concurrent writers can race and silently clobber each other's
//! changes. That is a known limitation of the flat-file design, not
//! something this module tries to solve.

use async_trait::async_trait;
use docshelf_common::{DocumentRecord, Result};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// Durable mapping from document id to [`DocumentRecord`].
///
/// The catalog is the sole authority for record existence. Origin
/// policy (which records may be deleted) is enforced by callers, not
/// here: `delete` removes any record it is given.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Upsert by `id`: remove any existing record with the same id,
    /// then append. At most one record per id remains afterwards.
    async fn add(&self, record: DocumentRecord) -> Result<()>;

    /// Look up a record by id. A missing id is `None`, never an error.
    async fn get(&self, id: &str) -> Result<Option<DocumentRecord>>;

    /// All records, in unspecified order.
    async fn list(&self) -> Result<Vec<DocumentRecord>>;

    /// Remove the record with the given id if present. Returns
    /// whether a removal occurred.
    async fn delete(&self, id: &str) -> Result<bool>;
}

/// Catalog persisted as a single human-readable JSON array.
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    /// Create a catalog backed by the given file path. The file and
    /// its parent directory are created lazily on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full record set. An absent backing file reads as an
    /// empty catalog.
    async fn read_all(&self) -> Result<Vec<DocumentRecord>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "catalog file absent, treating as empty");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Rewrite the backing file wholesale with the given record set.
    async fn write_all(&self, records: &[DocumentRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(records)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl Catalog for JsonFileCatalog {
    async fn add(&self, record: DocumentRecord) -> Result<()> {
        let mut records = self.read_all().await?;
        records.retain(|r| r.id != record.id);
        records.push(record);
        self.write_all(&records).await
    }

    async fn get(&self, id: &str) -> Result<Option<DocumentRecord>> {
        let records = self.read_all().await?;
        Ok(records.into_iter().find(|r| r.id == id))
    }

    async fn list(&self) -> Result<Vec<DocumentRecord>> {
        self.read_all().await
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut records = self.read_all().await?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.write_all(&records).await?;
        Ok(true)
    }
}

/// In-memory catalog with the same semantics as [`JsonFileCatalog`].
#[derive(Default)]
pub struct MemoryCatalog {
    records: Mutex<Vec<DocumentRecord>>,
}

impl MemoryCatalog {
    /// Create an empty in-memory catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn add(&self, record: DocumentRecord) -> Result<()> {
        let mut records = self.records.lock().await;
        records.retain(|r| r.id != record.id);
        records.push(record);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<DocumentRecord>> {
        let records = self.records.lock().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<DocumentRecord>> {
        Ok(self.records.lock().await.clone())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use docshelf_common::Origin;

    fn record(id: &str, origin: Origin) -> DocumentRecord {
        DocumentRecord {
            id: id.to_string(),
            file_name: id.to_string(),
            location: format!("/documents/{id}"),
            uploaded_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
            origin,
        }
    }

    #[tokio::test]
    async fn test_upsert_replaces_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = JsonFileCatalog::new(dir.path().join("documents.json"));

        catalog.add(record("a.pdf", Origin::Local)).await.unwrap();
        let mut second = record("a.pdf", Origin::Remote);
        second.location = "https://blob.example/a.pdf".to_string();
        catalog.add(second.clone()).await.unwrap();

        let records = catalog.list().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], second);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = JsonFileCatalog::new(dir.path().join("documents.json"));
        assert!(catalog.get("nope.pdf").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_on_absent_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = JsonFileCatalog::new(dir.path().join("missing/documents.json"));
        assert!(catalog.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_reports_removal() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = JsonFileCatalog::new(dir.path().join("documents.json"));

        catalog.add(record("a.pdf", Origin::Remote)).await.unwrap();
        assert!(catalog.delete("a.pdf").await.unwrap());
        assert!(!catalog.delete("a.pdf").await.unwrap());
        assert!(catalog.get("a.pdf").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("documents.json");

        JsonFileCatalog::new(&path)
            .add(record("a.pdf", Origin::Local))
            .await
            .unwrap();

        let reopened = JsonFileCatalog::new(&path);
        let records = reopened.list().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "a.pdf");
    }

    #[tokio::test]
    async fn test_memory_catalog_upsert() {
        let catalog = MemoryCatalog::new();
        catalog.add(record("a.pdf", Origin::Local)).await.unwrap();
        catalog.add(record("a.pdf", Origin::Local)).await.unwrap();
        assert_eq!(catalog.list().await.unwrap().len(), 1);
        assert!(catalog.delete("a.pdf").await.unwrap());
        assert!(!catalog.delete("a.pdf").await.unwrap());
    }
}
