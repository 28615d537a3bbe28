//! Axum route handlers for the Upload API.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::state::AppState;
use crate::upload::storage::file_key;

/// Multipart field carrying the media file.
const FILE_FIELD: &str = "file";

const FILE_MISSING: &str = "ファイルが見つかりません";
const UPLOAD_FAILED: &str = "ファイルアップロードに失敗しました";
const FILE_TOO_LARGE: &str = "ファイルサイズが上限を超えています";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_name: String,
    pub file_path: String,
    pub file_size: usize,
}

/// POST /api/upload
///
/// Accepts one `file` field and stores it. Other fields are ignored.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::validation(e.body_text()))?;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;

        if bytes.is_empty() {
            return Err(AppError::validation(FILE_MISSING));
        }
        if bytes.len() > state.config.max_upload_bytes {
            return Err(AppError::PayloadTooLarge(FILE_TOO_LARGE.to_string()));
        }

        let key = file_key(&original_name);
        let file_size = bytes.len();
        let file_path = state.store.store(&key, bytes).await.map_err(|e| {
            error!("{} store failed for {key}: {e}", state.store.backend());
            AppError::Storage(UPLOAD_FAILED.to_string())
        })?;

        info!("Upload accepted: {original_name} ({file_size} bytes) -> {file_path}");
        return Ok(Json(UploadResponse {
            file_name: original_name,
            file_path,
            file_size,
        }));
    }

    Err(AppError::validation(FILE_MISSING))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(FILE_TOO_LARGE.to_string())
    } else {
        AppError::validation(e.body_text())
    }
}
