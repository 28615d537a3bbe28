use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::llm_client::AiModel;

/// 100 MiB. Serverless deployments override this with MAX_UPLOAD_BYTES.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Provider keys are optional at startup; a call to a provider without a key fails.
#[derive(Debug, Clone)]
pub struct Config {
    pub xai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub grok_api_url: Option<String>,
    pub gemini_api_url: Option<String>,
    pub default_model: AiModel,
    pub storage: Option<ObjectStorageConfig>,
    pub upload_dir: PathBuf,
    pub feedback_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

/// S3 settings. Present only when region, credentials and bucket are all set.
#[derive(Debug, Clone)]
pub struct ObjectStorageConfig {
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    pub endpoint: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let default_model = match optional_env("PREFERRED_AI_MODEL") {
            Some(name) => name
                .parse::<AiModel>()
                .with_context(|| format!("PREFERRED_AI_MODEL '{name}' is not a known model"))?,
            None => AiModel::default(),
        };

        let storage = match (
            optional_env("AWS_REGION"),
            optional_env("AWS_ACCESS_KEY_ID"),
            optional_env("AWS_SECRET_ACCESS_KEY"),
            optional_env("S3_BUCKET_NAME"),
        ) {
            (Some(region), Some(access_key_id), Some(secret_access_key), Some(bucket)) => {
                Some(ObjectStorageConfig {
                    region,
                    access_key_id,
                    secret_access_key,
                    bucket,
                    endpoint: optional_env("S3_ENDPOINT"),
                })
            }
            _ => None,
        };

        Ok(Config {
            xai_api_key: optional_env("XAI_API_KEY"),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            grok_api_url: optional_env("GROK_API_URL"),
            gemini_api_url: optional_env("GEMINI_API_URL"),
            default_model,
            storage,
            upload_dir: optional_env("UPLOAD_DIR")
                .unwrap_or_else(|| "uploads".to_string())
                .into(),
            feedback_dir: optional_env("FEEDBACK_DIR")
                .unwrap_or_else(|| "feedback".to_string())
                .into(),
            max_upload_bytes: match optional_env("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an environment variable, treating blank values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
impl Config {
    /// Local-only configuration rooted in a scratch directory.
    pub fn for_tests(root: &std::path::Path) -> Self {
        Config {
            xai_api_key: None,
            gemini_api_key: None,
            grok_api_url: None,
            gemini_api_url: None,
            default_model: AiModel::Gemini,
            storage: None,
            upload_dir: root.join("uploads"),
            feedback_dir: root.join("feedback"),
            max_upload_bytes: 1024,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
