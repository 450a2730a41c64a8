//! Document API handlers

use crate::auth_middleware;
use axum::{
    Json, Router,
    body::Body,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{HeaderMap, StatusCode, header},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use docshelf_auth::{COOKIE_NAME, CookiePolicy, Credentials, SessionToken};
use docshelf_blob::BlobClient;
use docshelf_catalog::{Catalog, RemoteEntry, scan_local_documents, sync_remote_documents};
use docshelf_common::{DocumentRecord, Error, Origin};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Application state shared across handlers
pub struct AppState {
    pub catalog: Arc<dyn Catalog>,
    pub blob: Option<BlobClient>,
    pub credentials: Credentials,
    pub cookie_policy: CookiePolicy,
    pub public_base_url: String,
    pub documents_dir: PathBuf,
    pub max_upload_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

/// Build the full application router, middleware included.
pub fn router(state: Arc<AppState>) -> Router {
    // Leave headroom over the document limit for multipart framing
    let body_limit = DefaultBodyLimit::max(
        usize::try_from(state.max_upload_bytes)
            .unwrap_or(usize::MAX)
            .saturating_add(64 * 1024),
    );

    Router::new()
        .route("/health", get(health_check))
        .route("/api/auth/login", post(login))
        .route("/api/auth/renew", post(renew))
        .route("/api/documents", get(list_documents))
        .route(
            "/api/documents/{id}",
            get(get_document).delete(delete_document),
        )
        .route("/api/upload", post(upload))
        .nest_service("/documents", ServeDir::new(&state.documents_dir))
        .layer(body_limit)
        .layer(middleware::from_fn(auth_middleware::auth_layer))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API error response. User-facing bodies stay generic; the detail
/// goes to the logs.
pub enum ApiError {
    Unauthorized(&'static str),
    App(Error),
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self::App(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.to_string()),
            Self::App(e) => {
                let status = StatusCode::from_u16(e.http_status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let message = match &e {
                    Error::NotFound(_) => "document not found".to_string(),
                    Error::Validation(msg) | Error::Forbidden(msg) => msg.clone(),
                    Error::Config(_) => "service is not configured for this operation".to_string(),
                    Error::Io(_) | Error::Serialization(_) | Error::Storage(_) => {
                        "internal server error".to_string()
                    }
                };
                if status.is_server_error() {
                    error!("request failed: {e}");
                } else {
                    info!("request rejected: {e}");
                }
                (status, message)
            }
        };

        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Validate the credential pair and issue the session cookie
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    state
        .credentials
        .verify(&request.username, &request.password)
        .map_err(|_| ApiError::Unauthorized("invalid username or password"))?;

    let token = SessionToken::issue(state.credentials.username());
    let cookie = state.cookie_policy.set_cookie(&token);
    info!(user = %token.username, "login successful");

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "success": true, "message": "login successful" })),
    )
        .into_response())
}

/// Re-issue the current session cookie with a refreshed expiry.
/// Credentials are not re-validated.
pub async fn renew(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let value = auth_middleware::cookie_value(&headers, COOKIE_NAME)
        .ok_or(ApiError::Unauthorized("no session found"))?;
    let token =
        SessionToken::decode(&value).map_err(|_| ApiError::Unauthorized("invalid session"))?;

    let cookie = state.cookie_policy.set_cookie(&token);
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "success": true, "message": "session renewed" })),
    )
        .into_response())
}

/// Document shape returned by the listing and metadata endpoints
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentSummary {
    id: String,
    name: String,
    extension: String,
    last_modified: DateTime<Utc>,
    url: String,
    is_local: bool,
}

impl From<DocumentRecord> for DocumentSummary {
    fn from(record: DocumentRecord) -> Self {
        Self {
            extension: record.extension(),
            id: record.id,
            name: record.file_name,
            last_modified: record.uploaded_at,
            url: record.location,
            is_local: record.origin == Origin::Local,
        }
    }
}

/// Bring the catalog up to date with the local directory and the
/// remote listing. Reconciliation failures are logged and swallowed:
/// they must never abort the listing request that triggered them.
async fn refresh_catalog(state: &AppState) {
    if let Err(e) = scan_local_documents(state.catalog.as_ref(), &state.documents_dir).await {
        warn!("local document scan failed: {e}");
    }

    let Some(blob) = &state.blob else {
        return;
    };
    match blob.list().await {
        Ok(objects) => {
            let entries: Vec<RemoteEntry> = objects.into_iter().map(Into::into).collect();
            if let Err(e) = sync_remote_documents(state.catalog.as_ref(), &entries).await {
                warn!("remote document sync failed: {e}");
            }
        }
        Err(e) => warn!("remote listing failed: {e}"),
    }
}

/// List all cataloged documents, most recently uploaded first
pub async fn list_documents(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    refresh_catalog(&state).await;

    let mut records = state.catalog.list().await?;
    records.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));

    let documents: Vec<DocumentSummary> = records.into_iter().map(Into::into).collect();
    let total = documents.len();
    Ok(Json(json!({ "success": true, "documents": documents, "total": total })).into_response())
}

/// Fetch metadata for a single document
pub async fn get_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    refresh_catalog(&state).await;

    let record = state
        .catalog
        .get(&id)
        .await?
        .ok_or_else(|| Error::not_found(id.clone()))?;

    let document = DocumentSummary::from(record);
    Ok(Json(json!({ "success": true, "document": document })).into_response())
}

/// Accept a multipart document upload, store it remotely, and
/// catalog the stored object
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::validation(format!("malformed upload body: {e}")))?
    {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| Error::validation(format!("unreadable upload body: {e}")))?;
            file = Some((file_name, content_type, data));
            break;
        }
    }

    let Some((file_name, content_type, data)) = file else {
        return Err(Error::validation("no file provided").into());
    };

    if !state.allowed_content_types.iter().any(|t| *t == content_type) {
        return Err(Error::validation("unsupported file type").into());
    }
    if data.len() as u64 > state.max_upload_bytes {
        return Err(Error::validation(format!(
            "file too large (max {} bytes)",
            state.max_upload_bytes
        ))
        .into());
    }

    let Some(blob) = &state.blob else {
        return Err(Error::config("remote blob storage is not configured").into());
    };

    let object = blob.put(&file_name, &content_type, data).await?;

    state
        .catalog
        .add(DocumentRecord {
            id: object.pathname.clone(),
            file_name: file_name.clone(),
            location: object.url.clone(),
            uploaded_at: object.uploaded_at,
            origin: Origin::Remote,
        })
        .await?;

    let document_url = format!("/document/{}", urlencoding::encode(&object.pathname));
    let qr_url = format!("{}{}", state.public_base_url, document_url);
    info!(id = %object.pathname, "document uploaded");

    Ok(Json(json!({
        "success": true,
        "fileName": file_name,
        "documentUrl": document_url,
        "blobUrl": object.url,
        "qrUrl": qr_url,
        "message": "document uploaded",
    }))
    .into_response())
}

/// Delete a remote document: best-effort removal of the backing
/// object, then removal of the catalog record. Local documents are
/// never deletable through this endpoint.
pub async fn delete_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let record = state
        .catalog
        .get(&id)
        .await?
        .ok_or_else(|| Error::not_found(id.clone()))?;

    if !record.origin.is_deletable() {
        return Err(Error::forbidden("local documents cannot be deleted").into());
    }

    // Catalog consistency wins over storage consistency: a failed
    // blob deletion is logged but does not keep the record around.
    if let Some(blob) = &state.blob {
        if let Err(e) = blob.delete(&record.location).await {
            warn!(id = %id, "blob deletion failed, removing catalog record anyway: {e}");
        }
    }

    state.catalog.delete(&id).await?;
    info!(id = %id, "document deleted");

    Ok(Json(json!({ "success": true, "message": "document deleted" })).into_response())
}
