//! Axum route handlers for the Feedback API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::errors::AppError;
use crate::feedback::store::{save_feedback, FeedbackRecord};
use crate::state::AppState;

const FEEDBACK_REQUIRED: &str = "フィードバック内容が必要です";
const RATING_OUT_OF_RANGE: &str = "評価は1から5の間で選択してください";
const SAVE_FAILED: &str = "フィードバックの保存に失敗しました";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub rating: u8,
    pub email: Option<String>,
    pub session_id: Option<String>,
}

impl FeedbackRequest {
    /// Rejects blank feedback and ratings outside 1..=5; blank optionals become `None`.
    pub fn into_record(self) -> Result<FeedbackRecord, AppError> {
        let feedback = self.feedback.trim();
        if feedback.is_empty() {
            return Err(AppError::validation(FEEDBACK_REQUIRED));
        }
        if !(1..=5).contains(&self.rating) {
            return Err(AppError::validation(RATING_OUT_OF_RANGE));
        }

        Ok(FeedbackRecord {
            feedback: feedback.to_string(),
            rating: self.rating,
            email: non_blank(self.email),
            session_id: non_blank(self.session_id),
            submitted_at: Utc::now(),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// POST /api/feedback
pub async fn handle_feedback(
    State(state): State<AppState>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::validation(e.body_text()))?;
    let record = request.into_record()?;

    let path = save_feedback(&state.config.feedback_dir, &record)
        .await
        .map_err(|e| {
            error!("Failed to save feedback: {e}");
            AppError::Storage(SAVE_FAILED.to_string())
        })?;

    info!("Feedback saved to {} (rating {})", path.display(), record.rating);
    Ok(Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(feedback: &str, rating: u8) -> FeedbackRequest {
        FeedbackRequest {
            feedback: feedback.to_string(),
            rating,
            email: Some("  ".to_string()),
            session_id: Some("3f1c".to_string()),
        }
    }

    #[test]
    fn test_rejects_blank_feedback() {
        let err = request("   ", 5).into_record().unwrap_err();
        assert!(matches!(err, AppError::Validation { message, .. } if message == FEEDBACK_REQUIRED));
    }

    #[test]
    fn test_rejects_out_of_range_rating() {
        for rating in [0, 6] {
            let err = request("良かった", rating).into_record().unwrap_err();
            assert!(matches!(err, AppError::Validation { .. }));
        }
    }

    #[test]
    fn test_blank_email_becomes_none() {
        let record = request(" 良かった ", 3).into_record().unwrap();
        assert_eq!(record.feedback, "良かった");
        assert_eq!(record.email, None);
        assert_eq!(record.session_id.as_deref(), Some("3f1c"));
    }
}
