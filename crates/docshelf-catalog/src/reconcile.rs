//! Reconciliation scans
//!
//! Idempotent "ensure-cataloged" operations: they insert records for
//! untracked local files and remote blob objects, and never remove or
//! alter entries that already exist. Both are safe to run before any
//! listing request; failures here are logged by callers and must not
//! abort the request that triggered them.

use crate::store::Catalog;
use chrono::{DateTime, Utc};
use docshelf_common::{DocumentRecord, Origin, Result};
use std::path::Path;
use tracing::{debug, info, warn};

/// One object from a remote blob store listing.
#[derive(Clone, Debug)]
pub struct RemoteEntry {
    /// Storage-assigned object name, used as the catalog id
    pub name: String,
    /// Public URL of the object
    pub url: String,
    /// Upload time reported by the store
    pub uploaded_at: DateTime<Utc>,
}

impl RemoteEntry {
    /// Display name: the final path segment of the object name
    #[must_use]
    pub fn file_name(&self) -> String {
        self.name
            .rsplit('/')
            .next()
            .unwrap_or(&self.name)
            .to_string()
    }
}

/// Ensure every regular file in `dir` has a `Local` catalog record.
///
/// Files are matched by filename-as-id; already-cataloged files are
/// left untouched, including their original `uploaded_at`. A missing
/// directory means there is nothing to scan. Per-file stat errors are
/// logged and skipped.
pub async fn scan_local_documents(catalog: &dyn Catalog, dir: &Path) -> Result<()> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(dir = %dir.display(), "no local documents directory, nothing to scan");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    while let Some(entry) = entries.next_entry().await? {
        let metadata = match entry.metadata().await {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!(path = %entry.path().display(), "failed to stat local document: {e}");
                continue;
            }
        };
        if !metadata.is_file() {
            continue;
        }

        let Ok(file_name) = entry.file_name().into_string() else {
            warn!(path = %entry.path().display(), "skipping non-UTF-8 filename");
            continue;
        };

        if catalog.get(&file_name).await?.is_some() {
            continue;
        }

        let uploaded_at = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());

        info!(file = %file_name, "cataloging untracked local document");
        catalog
            .add(DocumentRecord {
                // Filename as id keeps the original /document/<file> URLs stable
                id: file_name.clone(),
                location: format!("/documents/{file_name}"),
                file_name,
                uploaded_at,
                origin: Origin::Local,
            })
            .await?;
    }

    Ok(())
}

/// Ensure every object in a remote listing has a `Remote` catalog
/// record, matched by the storage-assigned object name.
pub async fn sync_remote_documents(catalog: &dyn Catalog, entries: &[RemoteEntry]) -> Result<()> {
    for entry in entries {
        if catalog.get(&entry.name).await?.is_some() {
            continue;
        }

        info!(object = %entry.name, "cataloging untracked remote document");
        catalog
            .add(DocumentRecord {
                id: entry.name.clone(),
                file_name: entry.file_name(),
                location: entry.url.clone(),
                uploaded_at: entry.uploaded_at,
                origin: Origin::Remote,
            })
            .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCatalog;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_scan_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("guide.pdf"), b"%PDF-")
            .await
            .unwrap();

        let catalog = MemoryCatalog::new();
        scan_local_documents(&catalog, dir.path()).await.unwrap();
        let first = catalog.list().await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, "guide.pdf");
        assert_eq!(first[0].origin, Origin::Local);
        assert_eq!(first[0].location, "/documents/guide.pdf");

        scan_local_documents(&catalog, dir.path()).await.unwrap();
        let second = catalog.list().await.unwrap();
        assert_eq!(second, first, "second scan must not touch existing records");
    }

    #[tokio::test]
    async fn test_scan_missing_dir_is_noop() {
        let catalog = MemoryCatalog::new();
        scan_local_documents(&catalog, Path::new("/nonexistent/docshelf-test"))
            .await
            .unwrap();
        assert!(catalog.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scan_skips_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::create_dir(dir.path().join("nested")).await.unwrap();
        tokio::fs::write(dir.path().join("a.md"), b"# hi").await.unwrap();

        let catalog = MemoryCatalog::new();
        scan_local_documents(&catalog, dir.path()).await.unwrap();
        let records = catalog.list().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "a.md");
    }

    #[tokio::test]
    async fn test_remote_sync_is_idempotent() {
        let catalog = MemoryCatalog::new();
        let entries = vec![RemoteEntry {
            name: "report-x7k2.pdf".to_string(),
            url: "https://blob.example/report-x7k2.pdf".to_string(),
            uploaded_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        }];

        sync_remote_documents(&catalog, &entries).await.unwrap();
        sync_remote_documents(&catalog, &entries).await.unwrap();

        let records = catalog.list().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].origin, Origin::Remote);
        assert_eq!(records[0].file_name, "report-x7k2.pdf");
        assert_eq!(records[0].location, "https://blob.example/report-x7k2.pdf");
    }

    #[tokio::test]
    async fn test_remote_file_name_is_last_path_segment() {
        let entry = RemoteEntry {
            name: "uploads/2024/report.pdf".to_string(),
            url: "https://blob.example/uploads/2024/report.pdf".to_string(),
            uploaded_at: Utc::now(),
        };
        assert_eq!(entry.file_name(), "report.pdf");
    }
}
