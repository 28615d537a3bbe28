//! Funnel generation — orchestrates the three content generators for one request.
//!
//! Flow: validate → derive target audience / key points → run ad copy, landing page
//! and webinar script concurrently → combine.
//!
//! All-or-nothing: the first generator error aborts the join and no partial result
//! is returned. Nothing is persisted; the browser keeps the result.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::ad_copy::{generate_ad_copy, AdCopyOptions, SalesPeriod};
use crate::generation::key_points::{extract_key_points, leading_chars};
use crate::generation::landing_page::{generate_landing_page, LandingPageOptions};
use crate::generation::parser::AdCopy;
use crate::generation::tone::WritingStyle;
use crate::generation::webinar_script::{
    generate_webinar_script, WebinarScriptOptions, WebinarType,
};
use crate::llm_client::{AiModel, LlmGateway};

const DEFAULT_TARGET_AUDIENCE: &str = "一般層";
const DEFAULT_EXPERTISE: &str = "一般";
const DEFAULT_VIDEO_URL: &str = "/sample.mp4";
const CHECKOUT_URL: &str = "/checkout.html";
/// Characters of `text` used as the landing-page hero description.
const HERO_DESCRIPTION_CHARS: usize = 200;

const MISSING_FIELDS_MESSAGE: &str = "必須項目が不足しています";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Raw body of `POST /api/generate`, as the browser form posts it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub expertise: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// Number or numeric string; anything else is treated as absent.
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<u64>,
    #[serde(default)]
    pub sales_period: Option<String>,
    #[serde(default)]
    pub audio_path: Option<String>,
    #[serde(default)]
    pub video_path: Option<String>,
    #[serde(default)]
    pub ai_model: Option<String>,
}

/// Combined result returned to the browser.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub success: bool,
    pub lp_html: String,
    pub script: String,
    pub ad_copy: AdCopy,
    pub session_id: String,
}

/// A validated request with every derived field resolved.
#[derive(Debug, Clone)]
pub struct FunnelInput {
    pub name: String,
    pub text: String,
    pub target_audience: String,
    pub expertise: String,
    pub key_points: Vec<String>,
    pub price: Option<u64>,
    pub sales_period: Option<SalesPeriod>,
    pub video_url: String,
    pub audio_path: Option<String>,
    pub model: AiModel,
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

impl GenerateRequest {
    /// Checks required fields and derives everything the generators need.
    pub fn validate(self, default_model: AiModel) -> Result<FunnelInput, AppError> {
        let name = non_blank(self.name);
        let text = non_blank(self.text);

        let (name, text) = match (name, text) {
            (Some(name), Some(text)) => (name, text),
            (name, text) => {
                let mut fields = Map::new();
                fields.insert(
                    "name".to_string(),
                    missing_message(name.is_none(), "商品名が必要です"),
                );
                fields.insert(
                    "text".to_string(),
                    missing_message(text.is_none(), "説明文が必要です"),
                );
                return Err(AppError::Validation {
                    message: MISSING_FIELDS_MESSAGE.to_string(),
                    fields: Some(fields),
                });
            }
        };

        let model = match non_blank(self.ai_model) {
            Some(raw) => raw.parse::<AiModel>().map_err(|e| {
                let mut fields = Map::new();
                fields.insert("aiModel".to_string(), Value::String(e.to_string()));
                AppError::Validation {
                    message: "AIモデルの指定が不正です".to_string(),
                    fields: Some(fields),
                }
            })?,
            None => default_model,
        };

        let genre = non_blank(self.genre);
        let expertise = non_blank(self.expertise)
            .or_else(|| genre.clone())
            .unwrap_or_else(|| DEFAULT_EXPERTISE.to_string());
        let target_audience = genre.unwrap_or_else(|| DEFAULT_TARGET_AUDIENCE.to_string());

        let sales_period = non_blank(self.sales_period).and_then(|raw| {
            let parsed = raw.parse::<SalesPeriod>().ok();
            if parsed.is_none() {
                debug!("Ignoring unknown salesPeriod '{raw}'");
            }
            parsed
        });

        Ok(FunnelInput {
            key_points: extract_key_points(&text),
            target_audience,
            expertise,
            price: self.price.filter(|p| *p > 0),
            sales_period,
            video_url: non_blank(self.video_path).unwrap_or_else(|| DEFAULT_VIDEO_URL.to_string()),
            audio_path: non_blank(self.audio_path),
            model,
            name,
            text,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn missing_message(missing: bool, message: &str) -> Value {
    if missing {
        Value::String(message.to_string())
    } else {
        Value::Null
    }
}

/// Accepts `12800`, `12800.0`, `"12800"` and `"12800円"` (leading digits, like `parseInt`).
fn lenient_price<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Some(Value::String(s)) => {
            let digits: String = s.trim().chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        }
        _ => None,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Orchestration
// ────────────────────────────────────────────────────────────────────────────

/// Runs the three generators concurrently and combines their output.
pub async fn generate_funnel(
    gateway: &LlmGateway,
    input: FunnelInput,
) -> Result<GenerationResult, AppError> {
    info!(
        "Generating funnel for '{}' with {} ({} key points)",
        input.name,
        input.model,
        input.key_points.len()
    );
    if let Some(audio) = &input.audio_path {
        debug!("Audio material attached: {audio}");
    }

    let script_options = WebinarScriptOptions {
        topic: input.name.clone(),
        webinar_type: WebinarType::Standard,
        style: WritingStyle::Professional,
        expertise: input.expertise.clone(),
        target_audience: input.target_audience.clone(),
        key_points: input.key_points.clone(),
        model: input.model,
    };

    let ad_copy_options = AdCopyOptions {
        product: input.name.clone(),
        target: input.target_audience.clone(),
        price: input.price,
        benefits: input.key_points.clone(),
        unique: None,
        sales_period: input.sales_period,
        model: input.model,
    };

    let landing_page_options = LandingPageOptions {
        title: input.name.clone(),
        description: leading_chars(&input.text, HERO_DESCRIPTION_CHARS),
        video_url: input.video_url.clone(),
        cta_url: CHECKOUT_URL.to_string(),
        benefits: input.key_points.clone(),
        price: input.price,
        testimonials: Vec::new(),
        model: input.model,
    };

    let (script, ad_copy, lp_html) = tokio::try_join!(
        generate_webinar_script(gateway, &script_options),
        generate_ad_copy(gateway, &ad_copy_options),
        generate_landing_page(gateway, &landing_page_options),
    )?;

    let session_id = Uuid::new_v4().to_string();
    info!("Funnel generated for '{}' (session {session_id})", input.name);

    Ok(GenerationResult {
        success: true,
        lp_html,
        script,
        ad_copy,
        session_id,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
