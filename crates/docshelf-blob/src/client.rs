//! Remote blob store client

use bytes::Bytes;
use chrono::{DateTime, Utc};
use docshelf_catalog::RemoteEntry;
use docshelf_common::config::BlobConfig;
use docshelf_common::{Error, Result};
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::Deserialize;
use tracing::{debug, info};

/// One object as reported by the blob store.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteObject {
    /// Storage-assigned object name
    pub pathname: String,
    /// Public URL of the object
    pub url: String,
    /// Upload time reported by the store
    pub uploaded_at: DateTime<Utc>,
}

impl From<RemoteObject> for RemoteEntry {
    fn from(object: RemoteObject) -> Self {
        Self {
            name: object.pathname,
            url: object.url,
            uploaded_at: object.uploaded_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    blobs: Vec<RemoteObject>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PutResponse {
    pathname: String,
    url: String,
}

/// HTTP client for the remote blob store.
pub struct BlobClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl BlobClient {
    /// Build a client from configuration.
    #[must_use]
    pub fn new(config: &BlobConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    /// Upload a document. A random suffix is inserted before the
    /// extension so repeated uploads of the same filename never
    /// collide. Returns the stored object.
    pub async fn put(
        &self,
        file_name: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<RemoteObject> {
        let object_name = suffixed_name(file_name);
        let url = format!("{}/{}", self.endpoint, object_name);
        debug!(object = %object_name, size = data.len(), "uploading to blob store");

        let response = self
            .http
            .put(&url)
            .bearer_auth(&self.token)
            .header("content-type", content_type)
            .body(data)
            .send()
            .await
            .map_err(|e| Error::storage(format!("blob upload failed: {e}")))?
            .error_for_status()
            .map_err(|e| Error::storage(format!("blob upload rejected: {e}")))?;

        let put: PutResponse = response
            .json()
            .await
            .map_err(|e| Error::storage(format!("blob upload response unreadable: {e}")))?;

        info!(object = %put.pathname, "document stored in blob store");
        Ok(RemoteObject {
            pathname: put.pathname,
            url: put.url,
            uploaded_at: Utc::now(),
        })
    }

    /// List all objects currently in the store.
    pub async fn list(&self) -> Result<Vec<RemoteObject>> {
        let response = self
            .http
            .get(&self.endpoint)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| Error::storage(format!("blob listing failed: {e}")))?
            .error_for_status()
            .map_err(|e| Error::storage(format!("blob listing rejected: {e}")))?;

        let listing: ListResponse = response
            .json()
            .await
            .map_err(|e| Error::storage(format!("blob listing unreadable: {e}")))?;
        Ok(listing.blobs)
    }

    /// Delete the object behind the given public URL.
    pub async fn delete(&self, url: &str) -> Result<()> {
        self.http
            .post(format!("{}/delete", self.endpoint))
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "urls": [url] }))
            .send()
            .await
            .map_err(|e| Error::storage(format!("blob delete failed: {e}")))?
            .error_for_status()
            .map_err(|e| Error::storage(format!("blob delete rejected: {e}")))?;
        Ok(())
    }
}

/// Insert a random 8-character suffix before the extension:
/// `report.pdf` becomes `report-x7k2m9qa.pdf`.
fn suffixed_name(file_name: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    let suffix = suffix.to_lowercase();
    match file_name.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}-{suffix}.{ext}"),
        None => format!("{file_name}-{suffix}"),
    }
}
