//! Docshelf Gateway - document hosting HTTP API
//!
//! This binary serves the authenticated document-hosting API: login,
//! session renewal, document listing and metadata, multipart upload
//! to the remote blob store, and static serving of the local
//! documents directory.

mod api;
mod auth_middleware;

use anyhow::Result;
use api::AppState;
use clap::Parser;
use docshelf_auth::{CookiePolicy, Credentials};
use docshelf_blob::BlobClient;
use docshelf_catalog::JsonFileCatalog;
use docshelf_common::Config;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "docshelf-gateway")]
#[command(about = "Docshelf document hosting gateway")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "/etc/docshelf/gateway.toml")]
    config: String,

    /// Listen address override
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Load configuration: defaults, then the optional TOML file, then
/// `DOCSHELF_*` environment variables.
fn load_config(path: &str) -> Result<Config> {
    let mut builder =
        config::Config::builder().add_source(config::Config::try_from(&Config::default())?);
    if Path::new(path).exists() {
        builder = builder.add_source(config::File::with_name(path));
    }
    builder = builder.add_source(config::Environment::with_prefix("DOCSHELF").separator("__"));
    Ok(builder.build()?.try_deserialize()?)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Docshelf Gateway");

    let mut config = load_config(&args.config)?;
    if let Some(listen) = args.listen {
        config.server.listen = listen;
    }

    info!("Catalog file: {}", config.catalog.db_path.display());
    info!(
        "Local documents directory: {}",
        config.catalog.documents_dir.display()
    );

    let blob = match &config.blob {
        Some(blob_config) => {
            info!("Remote blob store: {}", blob_config.endpoint);
            Some(BlobClient::new(blob_config))
        }
        None => {
            info!("Remote blob store is NOT configured: uploads disabled, remote sync skipped");
            None
        }
    };

    match config.auth.session_ttl_secs {
        Some(secs) => info!("Session lifetime: {secs}s"),
        None => info!("Session lifetime: browser session"),
    }

    let state = Arc::new(AppState {
        catalog: Arc::new(JsonFileCatalog::new(&config.catalog.db_path)),
        blob,
        credentials: Credentials::from_config(&config.auth),
        cookie_policy: CookiePolicy::from_config(&config.auth),
        public_base_url: config.server.public_base_url.trim_end_matches('/').to_string(),
        documents_dir: config.catalog.documents_dir.clone(),
        max_upload_bytes: config.server.max_upload_bytes,
        allowed_content_types: config.server.allowed_content_types.clone(),
    });

    let app = api::router(state);

    let addr = config.server.listen;
    info!("Starting HTTP server on {addr}");

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down...");
        })
        .await?;

    info!("Gateway shut down gracefully");

    Ok(())
}
