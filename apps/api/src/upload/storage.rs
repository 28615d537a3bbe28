//! Upload storage backends.
//!
//! `LocalStore` writes under the upload directory. `S3Store` puts objects into the
//! configured bucket. `FallbackStore` wraps a primary store and swallows its failures
//! by writing to a local store instead.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::ObjectStorageConfig;

/// Object keys live under this prefix in the bucket.
const S3_KEY_PREFIX: &str = "uploads";

const MAX_FILE_NAME_CHARS: usize = 100;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("S3 error: {0}")]
    S3(String),
}

/// Persists one uploaded file and returns the reference the generator consumes
/// as `audioPath` / `videoPath`.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn store(&self, file_key: &str, bytes: Bytes) -> Result<String, StorageError>;

    /// Backend name for logs.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// Local disk
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl FileStore for LocalStore {
    async fn store(&self, file_key: &str, bytes: Bytes) -> Result<String, StorageError> {
        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.root.join(file_key);
        tokio::fs::write(&path, &bytes).await?;

        info!("Stored {} bytes at {}", bytes.len(), path.display());
        Ok(path.to_string_lossy().into_owned())
    }

    fn backend(&self) -> &'static str {
        "local"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// S3 / S3-compatible object storage
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct S3Store {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3Store {
    pub fn new(client: aws_sdk_s3::Client, config: &ObjectStorageConfig) -> Self {
        Self {
            client,
            bucket: config.bucket.clone(),
            public_base_url: public_base_url(config),
        }
    }
}

/// Virtual-hosted AWS URL, or path-style under a custom endpoint.
fn public_base_url(config: &ObjectStorageConfig) -> String {
    match &config.endpoint {
        Some(endpoint) => format!("{}/{}", endpoint.trim_end_matches('/'), config.bucket),
        None => format!(
            "https://{}.s3.{}.amazonaws.com",
            config.bucket, config.region
        ),
    }
}

#[async_trait]
impl FileStore for S3Store {
    async fn store(&self, file_key: &str, bytes: Bytes) -> Result<String, StorageError> {
        let key = format!("{S3_KEY_PREFIX}/{file_key}");
        let size = bytes.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;

        info!("Uploaded {size} bytes to s3://{}/{}", self.bucket, key);
        Ok(format!("{}/{}", self.public_base_url, key))
    }

    fn backend(&self) -> &'static str {
        "s3"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fallback
// ────────────────────────────────────────────────────────────────────────────

/// Tries `primary`; on failure logs and stores through `fallback` instead.
pub struct FallbackStore {
    primary: Arc<dyn FileStore>,
    fallback: LocalStore,
}

impl FallbackStore {
    pub fn new(primary: Arc<dyn FileStore>, fallback: LocalStore) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl FileStore for FallbackStore {
    async fn store(&self, file_key: &str, bytes: Bytes) -> Result<String, StorageError> {
        match self.primary.store(file_key, bytes.clone()).await {
            Ok(reference) => Ok(reference),
            Err(e) => {
                warn!(
                    "{} upload of {file_key} failed, falling back to local disk: {e}",
                    self.primary.backend()
                );
                self.fallback.store(file_key, bytes).await
            }
        }
    }

    fn backend(&self) -> &'static str {
        self.primary.backend()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Keys
// ────────────────────────────────────────────────────────────────────────────

/// Unique storage key: `<uuid>-<sanitized original name>`.
pub fn file_key(original_name: &str) -> String {
    format!("{}-{}", uuid::Uuid::new_v4(), sanitize_file_name(original_name))
}

/// Keeps the last path component and only letters, digits, `.`, `-`, `_`.
/// Never returns an empty or dot-leading name.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(|c| c == '/' || c == '\\').next().unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = cleaned.trim_start_matches('.');
    let limited: String = if trimmed.chars().count() > MAX_FILE_NAME_CHARS {
        // keep the tail so the extension survives
        let skip = trimmed.chars().count() - MAX_FILE_NAME_CHARS;
        trimmed.chars().skip(skip).collect()
    } else {
        trimmed.to_string()
    };

    if limited.is_empty() {
        "file".to_string()
    } else {
        limited
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingStore;

    #[async_trait]
    impl FileStore for FailingStore {
        async fn store(&self, _file_key: &str, _bytes: Bytes) -> Result<String, StorageError> {
            Err(StorageError::S3("connection refused".to_string()))
        }

        fn backend(&self) -> &'static str {
            "s3"
        }
    }

    #[tokio::test]
    async fn test_local_store_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("uploads"));

        let path = store
            .store("abc-intro.mp4", Bytes::from_static(b"video bytes"))
            .await
            .unwrap();

        assert!(path.ends_with("abc-intro.mp4"));
        let written = std::fs::read(&path).unwrap();
        assert_eq!(written, b"video bytes");
    }

    #[tokio::test]
    async fn test_fallback_swallows_primary_failure() {
        let dir = tempfile::tempdir().unwrap();
        let store = FallbackStore::new(Arc::new(FailingStore), LocalStore::new(dir.path()));

        let path = store
            .store("abc-voice.m4a", Bytes::from_static(b"audio"))
            .await
            .unwrap();

        assert!(path.starts_with(dir.path().to_string_lossy().as_ref()));
        assert_eq!(std::fs::read(&path).unwrap(), b"audio");
        assert_eq!(store.backend(), "s3");
    }

    #[test]
    fn test_public_base_url_for_aws_and_custom_endpoint() {
        let mut config = ObjectStorageConfig {
            region: "ap-northeast-1".to_string(),
            access_key_id: "id".to_string(),
            secret_access_key: "secret".to_string(),
            bucket: "funnel-media".to_string(),
            endpoint: None,
        };
        assert_eq!(
            public_base_url(&config),
            "https://funnel-media.s3.ap-northeast-1.amazonaws.com"
        );

        config.endpoint = Some("http://localhost:9000/".to_string());
        assert_eq!(public_base_url(&config), "http://localhost:9000/funnel-media");
    }

    #[test]
    fn test_sanitize_strips_directories_and_odd_characters() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\videos\\intro clip.mp4"), "intro_clip.mp4");
        assert_eq!(sanitize_file_name("紹介動画.mp4"), "紹介動画.mp4");
        assert_eq!(sanitize_file_name(".env"), "env");
        assert_eq!(sanitize_file_name(""), "file");
        assert_eq!(sanitize_file_name("dir/"), "file");
    }

    #[test]
    fn test_sanitize_keeps_extension_of_long_names() {
        let long = format!("{}.mp4", "a".repeat(300));
        let cleaned = sanitize_file_name(&long);
        assert_eq!(cleaned.chars().count(), MAX_FILE_NAME_CHARS);
        assert!(cleaned.ends_with(".mp4"));
    }

    #[test]
    fn test_file_key_is_unique() {
        let a = file_key("intro.mp4");
        let b = file_key("intro.mp4");
        assert_ne!(a, b);
        assert!(a.ends_with("-intro.mp4"));
    }
}
