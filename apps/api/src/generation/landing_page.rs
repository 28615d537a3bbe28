//! Landing-page generator.
//!
//! The model only writes copy: a body description and headline candidates, requested
//! sequentially. The HTML skeleton is fixed and every interpolated value is escaped,
//! so the document always has exactly one `<video>` and one CTA anchor.

use chrono::Datelike;
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::errors::AppError;
use crate::generation::parser::{parse_headlines, split_paragraphs};
use crate::generation::prompts::{LP_DESCRIPTION_PROMPT_TEMPLATE, LP_HEADLINE_PROMPT_TEMPLATE};
use crate::llm_client::prompts::{
    bullet_list, fill_template, format_yen, price_line, MARKETING_TONE_INSTRUCTION,
};
use crate::llm_client::{AiModel, GenerationParams, LlmError, LlmGateway};

pub const LANDING_PAGE_FAILURE: &str = "ランディングページの生成に失敗しました";

/// Feature blocks shown below the description.
const MAX_FEATURE_BLOCKS: usize = 4;

const DESCRIPTION_PARAMS: GenerationParams = GenerationParams::new(2000);
const HEADLINE_PARAMS: GenerationParams = GenerationParams::new(1000);

const TAILWIND_CDN: &str = "https://cdn.jsdelivr.net/npm/tailwindcss@2.2.19/dist/tailwind.min.css";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    pub comment: String,
}

#[derive(Debug, Clone)]
pub struct LandingPageOptions {
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub cta_url: String,
    pub benefits: Vec<String>,
    pub price: Option<u64>,
    pub testimonials: Vec<Testimonial>,
    pub model: AiModel,
}

/// Model-written copy that fills the skeleton.
#[derive(Debug, Clone, Default)]
pub struct LandingPageCopy {
    pub paragraphs: Vec<String>,
    pub headlines: Vec<String>,
}

/// Generates the full landing-page document.
/// Any failure is reported as `LANDING_PAGE_FAILURE`; the cause is logged.
pub async fn generate_landing_page(
    gateway: &LlmGateway,
    options: &LandingPageOptions,
) -> Result<String, AppError> {
    let copy = request_copy(gateway, options).await.map_err(|e| {
        error!("Landing page generation failed: {e}");
        AppError::Generation(LANDING_PAGE_FAILURE.to_string())
    })?;

    info!(
        "Landing page copy generated: {} paragraphs, {} headlines",
        copy.paragraphs.len(),
        copy.headlines.len()
    );

    Ok(render_landing_page(options, &copy, chrono::Utc::now().year()))
}

async fn request_copy(
    gateway: &LlmGateway,
    options: &LandingPageOptions,
) -> Result<LandingPageCopy, LlmError> {
    let benefits = bullet_list(&options.benefits);
    let price = price_line(options.price);

    let description_prompt = fill_template(
        LP_DESCRIPTION_PROMPT_TEMPLATE,
        &[
            ("title", options.title.as_str()),
            ("description", options.description.as_str()),
            ("benefits", benefits.as_str()),
            ("price_line", price.as_str()),
            ("tone_instruction", MARKETING_TONE_INSTRUCTION),
        ],
    );
    let description = gateway
        .generate(options.model, &description_prompt, DESCRIPTION_PARAMS)
        .await?;

    let headline_prompt = fill_template(
        LP_HEADLINE_PROMPT_TEMPLATE,
        &[
            ("title", options.title.as_str()),
            ("description", options.description.as_str()),
            ("benefits", benefits.as_str()),
        ],
    );
    let headlines = gateway
        .generate(options.model, &headline_prompt, HEADLINE_PARAMS)
        .await?;

    Ok(LandingPageCopy {
        paragraphs: split_paragraphs(&description),
        headlines: parse_headlines(&headlines),
    })
}

/// Renders the fixed HTML skeleton: hero, video, description, feature blocks,
/// optional testimonials, CTA, footer.
pub fn render_landing_page(options: &LandingPageOptions, copy: &LandingPageCopy, year: i32) -> String {
    let title = encode_text(&options.title);
    let description = encode_text(&options.description);
    let video_url = encode_double_quoted_attribute(&options.video_url);
    let cta_url = encode_double_quoted_attribute(&options.cta_url);

    let paragraphs: String = copy
        .paragraphs
        .iter()
        .map(|p| format!("<p>{}</p>", encode_text(p)))
        .collect();

    let features: String = copy
        .headlines
        .iter()
        .take(MAX_FEATURE_BLOCKS)
        .enumerate()
        .map(|(i, headline)| {
            let benefit = options
                .benefits
                .get(i)
                .or(options.benefits.first())
                .map(String::as_str)
                .unwrap_or_default();
            format!(
                r#"
      <div class="bg-white p-6 rounded-lg shadow">
        <h2 class="text-xl font-semibold mb-3">{}</h2>
        <p>{}</p>
      </div>"#,
                encode_text(headline),
                encode_text(benefit)
            )
        })
        .collect();

    let testimonials = render_testimonials(&options.testimonials);

    let price = options
        .price
        .map(|p| format!(r#"<p class="text-3xl font-bold mb-6">{}</p>"#, format_yen(p)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="ja">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <link href="{TAILWIND_CDN}" rel="stylesheet">
</head>
<body class="bg-gray-50 text-gray-800">
  <div class="max-w-5xl mx-auto px-4 py-12">
    <header class="text-center mb-16">
      <h1 class="text-4xl md:text-5xl font-bold mb-6">{title}</h1>
      <p class="text-xl text-gray-600 max-w-3xl mx-auto">{description}</p>
    </header>

    <div class="mb-16">
      <div class="aspect-w-16 aspect-h-9 rounded-lg overflow-hidden shadow-lg">
        <video src="{video_url}" controls class="w-full"></video>
      </div>
    </div>

    <div class="prose prose-lg max-w-3xl mx-auto mb-16">
      {paragraphs}
    </div>

    <div class="grid md:grid-cols-2 gap-8 mb-16">{features}
    </div>
{testimonials}
    <div class="text-center bg-primary-100 p-8 rounded-lg shadow-lg">
      <h2 class="text-2xl font-bold mb-4">今すぐ始めましょう</h2>
      {price}
      <a href="{cta_url}" class="inline-block bg-primary-600 hover:bg-primary-700 text-white font-bold py-3 px-8 rounded-lg shadow transition duration-300">
        今すぐ申し込む
      </a>
    </div>

    <footer class="mt-20 pt-8 border-t text-center text-gray-500">
      <p>&copy; {year} {title} All rights reserved.</p>
    </footer>
  </div>
</body>
</html>
"#
    )
}

fn render_testimonials(testimonials: &[Testimonial]) -> String {
    if testimonials.is_empty() {
        return String::new();
    }

    let cards: String = testimonials
        .iter()
        .map(|t| {
            format!(
                r#"
        <div class="bg-white p-6 rounded-lg shadow">
          <p class="italic mb-4">"{}"</p>
          <p class="font-semibold text-right">— {}</p>
        </div>"#,
                encode_text(&t.comment),
                encode_text(&t.name)
            )
        })
        .collect();

    format!(
        r#"
    <div class="mb-16">
      <h2 class="text-2xl font-semibold text-center mb-8">お客様の声</h2>
      <div class="grid md:grid-cols-2 gap-6">{cards}
      </div>
    </div>
"#
    )
}
