//! Ad-copy generator — one prompt, parsed into short and long variants.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::generation::parser::{parse_ad_copy, AdCopy, PARSE_FAILURE_PLACEHOLDER};
use crate::generation::prompts::AD_COPY_PROMPT_TEMPLATE;
use crate::llm_client::prompts::{bullet_list, fill_template, price_line};
use crate::llm_client::{AiModel, GenerationParams, LlmGateway};

pub const AD_COPY_FAILURE: &str = "広告コピーの生成に失敗しました";

const AD_COPY_PARAMS: GenerationParams = GenerationParams::new(2000);

/// How the product is sold. Limited runs get an urgency hint in the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalesPeriod {
    Limited,
    Evergreen,
}

impl SalesPeriod {
    fn prompt_line(&self) -> &'static str {
        match self {
            SalesPeriod::Limited => "販売形態: 期間限定販売（今だけの緊急性を訴求してください）",
            SalesPeriod::Evergreen => "販売形態: 常時販売（長く使える価値を訴求してください）",
        }
    }
}

impl FromStr for SalesPeriod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "limited" => Ok(SalesPeriod::Limited),
            "evergreen" => Ok(SalesPeriod::Evergreen),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdCopyOptions {
    pub product: String,
    pub target: String,
    pub price: Option<u64>,
    pub benefits: Vec<String>,
    pub unique: Option<String>,
    pub sales_period: Option<SalesPeriod>,
    pub model: AiModel,
}

pub fn build_ad_copy_prompt(options: &AdCopyOptions) -> String {
    let unique_line = options
        .unique
        .as_deref()
        .map(|u| format!("独自の強み: {u}"))
        .unwrap_or_default();
    let sales_period_line = options
        .sales_period
        .map(|p| p.prompt_line())
        .unwrap_or_default();
    let price = price_line(options.price);
    let benefits = bullet_list(&options.benefits);

    fill_template(
        AD_COPY_PROMPT_TEMPLATE,
        &[
            ("product", options.product.as_str()),
            ("target", options.target.as_str()),
            ("price_line", price.as_str()),
            ("benefits", benefits.as_str()),
            ("unique_line", unique_line.as_str()),
            ("sales_period_line", sales_period_line),
        ],
    )
}

/// Generates ad copy.
///
/// Missing sections in the response become the placeholder, but a provider failure
/// propagates: the combined generation must not succeed without ad copy.
pub async fn generate_ad_copy(
    gateway: &LlmGateway,
    options: &AdCopyOptions,
) -> Result<AdCopy, AppError> {
    let prompt = build_ad_copy_prompt(options);

    let response = gateway
        .generate(options.model, &prompt, AD_COPY_PARAMS)
        .await
        .map_err(|e| {
            error!("Ad copy generation failed: {e}");
            AppError::Generation(AD_COPY_FAILURE.to_string())
        })?;

    let copy = parse_ad_copy(&response);
    if copy.short == PARSE_FAILURE_PLACEHOLDER || copy.long == PARSE_FAILURE_PLACEHOLDER {
        warn!(
            "Ad copy response missing a section marker: {:?}",
            response.chars().take(80).collect::<String>()
        );
    }

    info!(
        "Ad copy generated: short={} chars, long={} chars",
        copy.short.chars().count(),
        copy.long.chars().count()
    );
    Ok(copy)
}
