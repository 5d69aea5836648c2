// src/providers/ollama.rs
use reqwest::Client;
use tracing::debug;

use super::{http_client, or_default, parse_body, send_json, LOCAL_TIMEOUT};
use crate::error::Result;
use crate::prompts::SYSTEM_PROMPT;
use crate::types::*;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_MODEL: &str = "mistral";
pub const DEFAULT_PORT: u16 = 11434;

const GENERATE_PATH: &str = "/api/generate";
const PROVIDER: &str = "ollama";

/// Appends `/api/generate` to endpoints that don't already end with it.
///
/// Bare `host[:port]` values, the form `OLLAMA_HOST` usually takes, get an
/// `http://` scheme and the default port.
pub fn normalize_endpoint(endpoint: Option<&str>) -> String {
    let endpoint = with_scheme(or_default(endpoint, DEFAULT_ENDPOINT));
    if endpoint.ends_with(GENERATE_PATH) {
        endpoint
    } else {
        format!("{}{}", endpoint.trim_end_matches('/'), GENERATE_PATH)
    }
}

fn with_scheme(endpoint: String) -> String {
    if endpoint.contains("://") {
        return endpoint;
    }
    let (host, path) = match endpoint.find('/') {
        Some(i) => endpoint.split_at(i),
        None => (endpoint.as_str(), ""),
    };
    if host.contains(':') {
        format!("http://{}{}", host, path)
    } else {
        format!("http://{}:{}{}", host, DEFAULT_PORT, path)
    }
}

/// Client for a locally hosted Ollama server. Never sends credentials.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: Client,
    endpoint: String,
    model: String,
}

impl OllamaClient {
    pub fn new(endpoint: Option<&str>, model: Option<&str>) -> Result<Self> {
        Ok(Self {
            http: http_client(LOCAL_TIMEOUT)?,
            endpoint: normalize_endpoint(endpoint),
            model: or_default(model, DEFAULT_MODEL),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn build_request(&self, diff: &str) -> OllamaGenerateRequest {
        OllamaGenerateRequest {
            model: self.model.clone(),
            prompt: diff.to_string(),
            system: SYSTEM_PROMPT.to_string(),
            stream: false,
        }
    }

    pub async fn generate_commit_message(&self, diff: &str) -> Result<String> {
        let request = self.build_request(diff);
        debug!(endpoint = %self.endpoint, model = %self.model, "requesting local generation");

        let body = send_json(PROVIDER, self.http.post(&self.endpoint), &request).await?;
        let resp: OllamaGenerateResponse = parse_body(PROVIDER, &body)?;

        Ok(resp.response.trim().to_string())
    }
}

// =============================================================================
// MODULE TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WhisperError;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn normalize_endpoint_defaults_to_localhost() {
        assert_eq!(normalize_endpoint(None), DEFAULT_ENDPOINT);
        assert_eq!(normalize_endpoint(Some("")), DEFAULT_ENDPOINT);
    }

    #[test]
    fn normalize_endpoint_appends_generate_path() {
        assert_eq!(
            normalize_endpoint(Some("http://host:1234")),
            "http://host:1234/api/generate"
        );
    }

    #[test]
    fn normalize_endpoint_strips_trailing_slash_before_appending() {
        assert_eq!(
            normalize_endpoint(Some("http://host:1234/")),
            "http://host:1234/api/generate"
        );
    }

    #[test]
    fn normalize_endpoint_adds_scheme_to_bare_host_and_port() {
        assert_eq!(
            normalize_endpoint(Some("127.0.0.1:11434")),
            "http://127.0.0.1:11434/api/generate"
        );
    }

    #[test]
    fn normalize_endpoint_adds_default_port_to_bare_host() {
        assert_eq!(normalize_endpoint(Some("0.0.0.0")), "http://0.0.0.0:11434/api/generate");
        assert_eq!(
            normalize_endpoint(Some("gpu-box/api/generate")),
            "http://gpu-box:11434/api/generate"
        );
    }

    #[test]
    fn normalize_endpoint_keeps_https_scheme() {
        assert_eq!(
            normalize_endpoint(Some("https://ollama.internal")),
            "https://ollama.internal/api/generate"
        );
    }

    #[test]
    fn normalize_endpoint_keeps_full_endpoint() {
        assert_eq!(
            normalize_endpoint(Some("http://host:1234/api/generate")),
            "http://host:1234/api/generate"
        );
    }

    #[test]
    fn request_matches_generate_shape() {
        let client = OllamaClient::new(None, None).unwrap();
        let value = serde_json::to_value(client.build_request("the diff")).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "mistral",
                "prompt": "the diff",
                "system": SYSTEM_PROMPT,
                "stream": false
            })
        );
    }

    #[tokio::test]
    async fn returns_trimmed_response_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_json(json!({
                "model": "llama3",
                "prompt": "the diff",
                "system": SYSTEM_PROMPT,
                "stream": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "llama3",
                "response": "  fix(io): close handle\n",
                "done": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OllamaClient::new(Some(&server.uri()), Some("llama3")).unwrap();
        let msg = client.generate_commit_message("the diff").await.unwrap();
        assert_eq!(msg, "fix(io): close handle");

        let requests = server.received_requests().await.unwrap();
        assert!(!requests[0].headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn error_status_keeps_code_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(404).set_body_string(r#"{"error":"model 'x' not found"}"#),
            )
            .mount(&server)
            .await;

        let client = OllamaClient::new(Some(&server.uri()), Some("x")).unwrap();
        let err = client.generate_commit_message("d").await.unwrap_err();
        match err {
            WhisperError::HttpStatus { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, r#"{"error":"model 'x' not found"}"#);
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }
}
