// src/providers/mod.rs
pub mod gemini;
pub mod ollama;
pub mod openai;

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Result, WhisperError};

/// Sampling temperature sent by every hosted provider.
pub const TEMPERATURE: f64 = 0.7;

pub const HOSTED_TIMEOUT: Duration = Duration::from_secs(30);
pub const LOCAL_TIMEOUT: Duration = Duration::from_secs(60);

pub(crate) fn http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// POST `body` as JSON and return the raw response text of a 2xx reply.
pub(crate) async fn send_json<T: Serialize>(
    provider: &'static str,
    req_builder: RequestBuilder,
    body: &T,
) -> Result<String> {
    let response = req_builder
        .header("Content-Type", "application/json")
        .json(body)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;
    debug!(provider, status = status.as_u16(), bytes = text.len(), "provider replied");

    if !status.is_success() {
        warn!(provider, status = status.as_u16(), "provider returned an error status");
        return Err(WhisperError::HttpStatus {
            status: status.as_u16(),
            body: text,
        });
    }

    Ok(text)
}

pub(crate) fn parse_body<T: DeserializeOwned>(provider: &'static str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| WhisperError::InvalidResponse { provider, source })
}

/// Treat `None` and `""` as "not configured".
pub(crate) fn or_default(value: Option<&str>, default: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}
