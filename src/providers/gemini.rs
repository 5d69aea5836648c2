// src/providers/gemini.rs
use reqwest::Client;
use tracing::debug;

use super::{http_client, or_default, parse_body, send_json, HOSTED_TIMEOUT, TEMPERATURE};
use crate::error::{Result, WhisperError};
use crate::prompts::SYSTEM_PROMPT;
use crate::types::*;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-pro";

const PROVIDER: &str = "gemini";

/// Single user turn: instructions, a blank line, then the diff.
pub fn build_prompt(diff: &str) -> String {
    format!("{}\n\nDiff:\n{}", SYSTEM_PROMPT, diff)
}

/// Gemini `generateContent` client. The key travels in the query string.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: Option<&str>, model: Option<&str>) -> Result<Self> {
        Self::with_base_url(GEMINI_API_BASE, api_key, model)
    }

    pub fn with_base_url(base_url: &str, api_key: Option<&str>, model: Option<&str>) -> Result<Self> {
        Ok(Self {
            http: http_client(HOSTED_TIMEOUT)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.unwrap_or_default().trim().to_string(),
            model: or_default(model, DEFAULT_MODEL),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Endpoint without the key, safe to log.
    pub fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    pub fn build_request(&self, diff: &str) -> GeminiGenerateContentRequest {
        GeminiGenerateContentRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: build_prompt(diff) }],
            }],
            generation_config: GeminiGenerationConfig { temperature: TEMPERATURE },
        }
    }

    pub async fn generate_commit_message(&self, diff: &str) -> Result<String> {
        let request = self.build_request(diff);
        let endpoint = self.endpoint();
        debug!(endpoint = %endpoint, model = %self.model, "requesting content generation");

        let req_builder = self.http.post(&endpoint).query(&[("key", self.api_key.as_str())]);
        let body = send_json(PROVIDER, req_builder, &request).await?;
        let resp: GeminiGenerateContentResponse = parse_body(PROVIDER, &body)?;

        resp.candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .map(|p| p.text.trim().to_string())
            .ok_or(WhisperError::EmptyResponse { provider: PROVIDER })
    }
}

// =============================================================================
// MODULE TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn prompt_joins_instructions_and_diff() {
        let prompt = build_prompt("+line");
        assert!(prompt.starts_with(SYSTEM_PROMPT));
        assert!(prompt.ends_with("\n\nDiff:\n+line"));
    }

    #[test]
    fn endpoint_embeds_model() {
        let client = GeminiClient::new(Some("k"), None).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn request_matches_generate_content_shape() {
        let client = GeminiClient::new(None, Some("gemini-1.5-flash")).unwrap();
        let value = serde_json::to_value(client.build_request("the diff")).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{"parts": [{"text": build_prompt("the diff")}]}],
                "generationConfig": {"temperature": 0.7}
            })
        );
    }

    #[tokio::test]
    async fn sends_key_in_query_and_returns_first_part() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .and(query_param("key", "g-key"))
            .and(body_json(json!({
                "contents": [{"parts": [{"text": build_prompt("the diff")}]}],
                "generationConfig": {"temperature": 0.7}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [
                    {"content": {"parts": [{"text": " docs: update readme \n"}, {"text": "x"}], "role": "model"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            GeminiClient::with_base_url(&server.uri(), Some("g-key"), Some("gemini-1.5-flash"))
                .unwrap();
        let msg = client.generate_commit_message("the diff").await.unwrap();
        assert_eq!(msg, "docs: update readme");
    }

    #[tokio::test]
    async fn missing_key_is_sent_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(query_param("key", ""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "ok"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::with_base_url(&server.uri(), None, None).unwrap();
        assert_eq!(client.generate_commit_message("d").await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn empty_candidates_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .mount(&server)
            .await;

        let client = GeminiClient::with_base_url(&server.uri(), Some("k"), None).unwrap();
        let err = client.generate_commit_message("d").await.unwrap_err();
        assert!(matches!(err, WhisperError::EmptyResponse { provider: "gemini" }));
    }

    #[tokio::test]
    async fn candidate_without_parts_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": []}, "finishReason": "SAFETY"}]
            })))
            .mount(&server)
            .await;

        let client = GeminiClient::with_base_url(&server.uri(), Some("k"), None).unwrap();
        let err = client.generate_commit_message("d").await.unwrap_err();
        assert!(matches!(err, WhisperError::EmptyResponse { .. }));
    }

    #[tokio::test]
    async fn error_status_is_not_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let client = GeminiClient::with_base_url(&server.uri(), Some("k"), None).unwrap();
        let err = client.generate_commit_message("d").await.unwrap_err();
        match err {
            WhisperError::HttpStatus { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, "API key not valid");
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }
}
