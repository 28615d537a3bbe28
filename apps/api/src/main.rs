mod config;
mod errors;
mod feedback;
mod generation;
mod llm_client;
mod routes;
mod state;
mod upload;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, ObjectStorageConfig};
use crate::llm_client::LlmGateway;
use crate::routes::build_router;
use crate::state::AppState;
use crate::upload::storage::{FallbackStore, FileStore, LocalStore, S3Store};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting AutoWebinar API v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmGateway::from_config(&config).context("failed to build LLM gateway")?;
    info!("LLM gateway initialized (default model: {})", config.default_model);

    let local = LocalStore::new(config.upload_dir.clone());
    let store: Arc<dyn FileStore> = match &config.storage {
        Some(storage) => {
            let client = build_s3_client(storage).await;
            info!("S3 upload storage enabled (bucket: {})", storage.bucket);
            Arc::new(FallbackStore::new(
                Arc::new(S3Store::new(client, storage)),
                local,
            ))
        }
        None => {
            info!(
                "S3 not configured; storing uploads in {}",
                config.upload_dir.display()
            );
            Arc::new(local)
        }
    };

    let state = AppState {
        llm,
        store,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client for AWS, or for an S3-compatible endpoint when one is set.
async fn build_s3_client(storage: &ObjectStorageConfig) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &storage.access_key_id,
        &storage.secret_access_key,
        None,
        None,
        "autowebinar-static",
    );

    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(storage.region.clone()))
        .credentials_provider(credentials);
    if let Some(endpoint) = &storage.endpoint {
        loader = loader.endpoint_url(endpoint);
    }
    let sdk_config = loader.load().await;

    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(storage.endpoint.is_some())
        .build();
    aws_sdk_s3::Client::from_conf(s3_config)
}
