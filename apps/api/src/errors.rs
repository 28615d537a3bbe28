use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Body shape is `{"error": "<message>"}`, plus `"fields"` for validation errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// `fields` maps each checked field to a message, or `null` when it passed.
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        fields: Option<Map<String, Value>>,
    },

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Generation failures surface their message verbatim.
    #[error("{0}")]
    Generation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation {
            message: message.into(),
            fields: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, fields) = match self {
            AppError::Validation { message, fields } => (StatusCode::BAD_REQUEST, message, fields),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg, None),
            AppError::Generation(msg) => {
                tracing::error!("Generation error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg, None)
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg, None)
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let body = match fields {
            Some(fields) => json!({ "error": message, "fields": fields }),
            None => json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_carries_fields() {
        let mut fields = Map::new();
        fields.insert("name".to_string(), json!("商品名が必要です"));
        fields.insert("text".to_string(), Value::Null);
        let response = AppError::Validation {
            message: "必須項目が不足しています".to_string(),
            fields: Some(fields),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "必須項目が不足しています");
        assert_eq!(body["fields"]["name"], "商品名が必要です");
        assert!(body["fields"]["text"].is_null());
    }

    #[tokio::test]
    async fn test_generation_error_surfaces_message() {
        let response = AppError::Generation("ウェビナー台本の生成に失敗しました".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "ウェビナー台本の生成に失敗しました");
        assert!(body.get("fields").is_none());
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = AppError::Internal(anyhow::anyhow!("disk exploded")).into_response();
        let body = body_json(response).await;
        assert_eq!(body["error"], "An internal server error occurred");
    }
}
