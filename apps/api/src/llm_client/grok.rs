//! Grok (xAI) chat-completions backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{send_json, AiModel, GenerationParams, LlmError, TextGenerator};

const GROK_API_URL: &str = "https://api.x.ai/v1/chat/completions";
pub const GROK_MODEL: &str = "grok-3-latest";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    presence_penalty: f32,
    frequency_penalty: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

impl ChatResponse {
    /// `choices[0].message.content`
    pub fn into_text(self) -> Result<String, LlmError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .ok_or(LlmError::MissingField("choices[0].message.content"))
    }
}

#[derive(Clone)]
pub struct GrokClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl GrokClient {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            endpoint: GROK_API_URL.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint;
        self
    }
}

#[async_trait]
impl TextGenerator for GrokClient {
    async fn generate(&self, prompt: &str, params: GenerationParams) -> Result<String, LlmError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(LlmError::MissingApiKey(AiModel::Grok))?;

        let body = ChatRequest {
            model: GROK_MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            top_p: 0.95,
            presence_penalty: 0.5,
            frequency_penalty: 0.3,
        };

        let request = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body);

        send_json::<ChatResponse>(request).await?.into_text()
    }
}
