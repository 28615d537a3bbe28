use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmGateway;
use crate::upload::storage::FileStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmGateway,
    /// S3 with local fallback when object storage is configured, local disk otherwise.
    pub store: Arc<dyn FileStore>,
    pub config: Config,
}
