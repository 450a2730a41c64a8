//! Document record data model
//!
//! A `DocumentRecord` is the catalog's notion of a known document.
//! The catalog file is the catalog of record: the local directory and
//! the remote blob listing are sources of truth for *content* only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a document's bytes live.
///
/// Governs deletability and URL shape: `Local` documents sit in the
/// served documents directory and are never deletable through the
/// API; `Remote` documents live in external blob storage and can be
/// deleted together with their backing object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Local,
    Remote,
}

impl Origin {
    /// Whether a record with this origin may be deleted via the API
    #[must_use]
    pub const fn is_deletable(self) -> bool {
        matches!(self, Self::Remote)
    }
}

/// Catalog entry for a single hosted document
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Unique catalog key: the original local filename, or the
    /// storage-assigned blob name
    pub id: String,
    /// Original display name (may differ from `id`)
    pub file_name: String,
    /// Relative local path (`/documents/<file>`) or absolute remote URL
    pub location: String,
    /// When the document was uploaded or first observed
    pub uploaded_at: DateTime<Utc>,
    /// Whether the bytes live locally or in remote blob storage
    pub origin: Origin,
}

impl DocumentRecord {
    /// Lowercased filename extension, empty when there is none
    #[must_use]
    pub fn extension(&self) -> String {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(file_name: &str) -> DocumentRecord {
        DocumentRecord {
            id: file_name.to_string(),
            file_name: file_name.to_string(),
            location: format!("/documents/{file_name}"),
            uploaded_at: Utc::now(),
            origin: Origin::Local,
        }
    }

    #[test]
    fn test_extension() {
        assert_eq!(record("Report.PDF").extension(), "pdf");
        assert_eq!(record("notes.md").extension(), "md");
        assert_eq!(record("README").extension(), "");
    }

    #[test]
    fn test_origin_deletability() {
        assert!(Origin::Remote.is_deletable());
        assert!(!Origin::Local.is_deletable());
    }

    #[test]
    fn test_record_serde_shape() {
        let rec = record("a.pdf");
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["fileName"], "a.pdf");
        assert_eq!(json["origin"], "local");
        let back: DocumentRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, rec);
    }
}
