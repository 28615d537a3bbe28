/// Text-generation gateway — the single point of entry for all provider calls.
///
/// ARCHITECTURAL RULE: generators never talk to a provider directly.
/// Every completion goes through `LlmGateway::generate`, which dispatches on `AiModel`.
///
/// One request per call. No retries: callers decide how a failure surfaces.
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

pub mod gemini;
pub mod grok;
pub mod prompts;

pub use gemini::GeminiClient;
pub use grok::GrokClient;

/// Long scripts (8000 tokens) can take minutes on the slower models.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("response is missing `{0}`")]
    MissingField(&'static str),

    #[error("no API key configured for {0}")]
    MissingApiKey(AiModel),
}

/// The two capability-equivalent providers a request can pick from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiModel {
    Grok,
    #[default]
    Gemini,
}

impl AiModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiModel::Grok => "grok",
            AiModel::Gemini => "gemini",
        }
    }
}

impl fmt::Display for AiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown model '{0}' (expected 'grok' or 'gemini')")]
pub struct UnknownModel(pub String);

impl FromStr for AiModel {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grok" => Ok(AiModel::Grok),
            "gemini" => Ok(AiModel::Gemini),
            _ => Err(UnknownModel(s.to_string())),
        }
    }
}

/// Sampling parameters forwarded to the provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl GenerationParams {
    pub const fn new(max_tokens: u32) -> Self {
        Self {
            max_tokens,
            temperature: 0.7,
        }
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::new(4000)
    }
}

/// One provider backend. Implemented by `GrokClient`, `GeminiClient`, and test stubs.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, params: GenerationParams) -> Result<String, LlmError>;
}

/// Routes a completion to the provider selected by `AiModel`.
#[derive(Clone)]
pub struct LlmGateway {
    grok: Arc<dyn TextGenerator>,
    gemini: Arc<dyn TextGenerator>,
}

impl LlmGateway {
    pub fn new(grok: Arc<dyn TextGenerator>, gemini: Arc<dyn TextGenerator>) -> Self {
        Self { grok, gemini }
    }

    /// Builds both HTTP providers, sharing one connection pool.
    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        let mut grok = GrokClient::new(client.clone(), config.xai_api_key.clone());
        if let Some(url) = &config.grok_api_url {
            grok = grok.with_endpoint(url.clone());
        }

        let mut gemini = GeminiClient::new(client, config.gemini_api_key.clone());
        if let Some(url) = &config.gemini_api_url {
            gemini = gemini.with_endpoint(url.clone());
        }

        Ok(Self::new(Arc::new(grok), Arc::new(gemini)))
    }

    pub async fn generate(
        &self,
        model: AiModel,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String, LlmError> {
        debug!(
            "Generating with {model}: max_tokens={}, prompt_chars={}",
            params.max_tokens,
            prompt.chars().count()
        );

        let provider = match model {
            AiModel::Grok => &self.grok,
            AiModel::Gemini => &self.gemini,
        };

        provider.generate(prompt, params).await.map_err(|e| {
            warn!("Generation with {model} failed: {e}");
            e
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared HTTP plumbing
// ────────────────────────────────────────────────────────────────────────────

/// Error body shape shared by both providers: `{"error": {"message": "..."}}`.
#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// Sends a JSON request and deserializes a 2xx body. Non-2xx becomes `LlmError::Api`.
pub(crate) async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, LlmError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(api_error(status.as_u16(), body));
    }

    Ok(serde_json::from_str(&body)?)
}

fn api_error(status: u16, body: String) -> LlmError {
    let message = serde_json::from_str::<ProviderError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    LlmError::Api { status, message }
}
