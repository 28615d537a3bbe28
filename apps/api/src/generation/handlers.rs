//! Axum route handlers for the Generation API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::generation::generator::{generate_funnel, GenerateRequest, GenerationResult};
use crate::state::AppState;

/// POST /api/generate
///
/// Validates the form fields, then produces landing page, webinar script and ad copy
/// in one all-or-nothing call.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerationResult>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::validation(e.body_text()))?;

    let input = request.validate(state.config.default_model)?;
    let result = generate_funnel(&state.llm, input).await?;

    Ok(Json(result))
}

/// POST /api/summarize
///
/// Placeholder until summary / personality extraction exists.
pub async fn handle_summarize() -> Json<Value> {
    Json(json!({ "message": "要約・抽出処理は今後実装予定です" }))
}
