// src/providers/openai.rs
use reqwest::Client;
use tracing::debug;

use super::{http_client, or_default, parse_body, send_json, HOSTED_TIMEOUT, TEMPERATURE};
use crate::error::{Result, WhisperError};
use crate::prompts::SYSTEM_PROMPT;
use crate::types::*;

pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const PROVIDER: &str = "openai";

/// Chat-completion client for OpenAI and any server speaking the same API.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: Client,
    api_key: String,
    model: String,
    url: String,
}

impl OpenAiClient {
    /// Empty `model` or `url` fall back to the hosted defaults. An empty key is
    /// kept and simply not sent.
    pub fn new(api_key: Option<&str>, model: Option<&str>, url: Option<&str>) -> Result<Self> {
        Ok(Self {
            http: http_client(HOSTED_TIMEOUT)?,
            api_key: api_key.unwrap_or_default().trim().to_string(),
            model: or_default(model, DEFAULT_MODEL),
            url: or_default(url, OPENAI_CHAT_URL),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn build_request(&self, diff: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage { role: "system".to_string(), content: SYSTEM_PROMPT.to_string() },
                ChatMessage { role: "user".to_string(), content: diff.to_string() },
            ],
            temperature: TEMPERATURE,
        }
    }

    pub async fn generate_commit_message(&self, diff: &str) -> Result<String> {
        let request = self.build_request(diff);
        debug!(url = %self.url, model = %self.model, "requesting chat completion");

        let mut req_builder = self.http.post(&self.url);
        if !self.api_key.is_empty() {
            req_builder = req_builder.bearer_auth(&self.api_key);
        }

        let body = send_json(PROVIDER, req_builder, &request).await?;
        let resp: ChatCompletionResponse = parse_body(PROVIDER, &body)?;

        resp.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(|s| s.trim().to_string())
            .ok_or(WhisperError::EmptyResponse { provider: PROVIDER })
    }
}
