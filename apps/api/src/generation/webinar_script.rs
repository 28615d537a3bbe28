//! Webinar script generator. Returns the model's text unmodified.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::errors::AppError;
use crate::generation::prompts::WEBINAR_SCRIPT_PROMPT_TEMPLATE;
use crate::generation::tone::WritingStyle;
use crate::llm_client::prompts::{bullet_list, fill_template};
use crate::llm_client::{AiModel, GenerationParams, LlmGateway};

pub const WEBINAR_SCRIPT_FAILURE: &str = "ウェビナー台本の生成に失敗しました";

const SCRIPT_PARAMS: GenerationParams = GenerationParams::new(8000);

/// Webinar format: drives the section list and running time in the prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebinarType {
    #[default]
    Standard,
    Mini,
    Premium,
}

impl WebinarType {
    pub fn display_name(&self) -> &'static str {
        match self {
            WebinarType::Standard => "標準ウェビナー",
            WebinarType::Mini => "ミニウェビナー",
            WebinarType::Premium => "プレミアムウェビナー",
        }
    }

    pub fn duration_minutes(&self) -> u32 {
        match self {
            WebinarType::Standard => 20,
            WebinarType::Mini => 10,
            WebinarType::Premium => 45,
        }
    }

    pub fn sections(&self) -> &'static [&'static str] {
        match self {
            WebinarType::Standard => &["導入", "本編", "Q&A", "クロージング"],
            WebinarType::Mini => &["導入", "本編", "クロージング"],
            WebinarType::Premium => &[
                "導入",
                "詳細解説",
                "事例紹介",
                "Q&A",
                "特典紹介",
                "クロージング",
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct WebinarScriptOptions {
    pub topic: String,
    pub webinar_type: WebinarType,
    pub style: WritingStyle,
    pub expertise: String,
    pub target_audience: String,
    pub key_points: Vec<String>,
    pub model: AiModel,
}

pub fn build_webinar_script_prompt(options: &WebinarScriptOptions) -> String {
    let key_points_block = if options.key_points.is_empty() {
        String::new()
    } else {
        format!("重要ポイント:\n{}", bullet_list(&options.key_points))
    };
    let duration = options.webinar_type.duration_minutes().to_string();
    let sections = options.webinar_type.sections().join("、");

    fill_template(
        WEBINAR_SCRIPT_PROMPT_TEMPLATE,
        &[
            ("topic", options.topic.as_str()),
            ("expertise", options.expertise.as_str()),
            ("target", options.target_audience.as_str()),
            ("type_name", options.webinar_type.display_name()),
            ("duration", duration.as_str()),
            ("sections", sections.as_str()),
            ("style", options.style.description()),
            ("key_points_block", key_points_block.as_str()),
        ],
    )
}

/// Generates the narration script. Any provider failure becomes `WEBINAR_SCRIPT_FAILURE`.
pub async fn generate_webinar_script(
    gateway: &LlmGateway,
    options: &WebinarScriptOptions,
) -> Result<String, AppError> {
    let prompt = build_webinar_script_prompt(options);

    let script = gateway
        .generate(options.model, &prompt, SCRIPT_PARAMS)
        .await
        .map_err(|e| {
            error!("Webinar script generation failed: {e}");
            AppError::Generation(WEBINAR_SCRIPT_FAILURE.to_string())
        })?;

    info!(
        "Webinar script generated: {} chars ({:?}, {:?})",
        script.chars().count(),
        options.webinar_type,
        options.style
    );
    Ok(script)
}
