// src/client.rs
use async_trait::async_trait;
use tracing::debug;

use crate::config::AiConfig;
use crate::error::{Result, WhisperError};
use crate::providers::gemini::GeminiClient;
use crate::providers::ollama::OllamaClient;
use crate::providers::openai::{OpenAiClient, OPENAI_CHAT_URL};

pub const PROVIDER_OPENAI: &str = "openai";
pub const PROVIDER_OPENAI_COMPATIBLE: &str = "openai-compatible";
pub const PROVIDER_OLLAMA: &str = "ollama";
pub const PROVIDER_GEMINI: &str = "gemini";

pub const SUPPORTED_PROVIDERS: &[&str] = &[
    PROVIDER_OPENAI,
    PROVIDER_OPENAI_COMPATIBLE,
    PROVIDER_OLLAMA,
    PROVIDER_GEMINI,
];

/// "Turn a staged diff into a commit message."
#[async_trait]
pub trait CommitMessageGenerator: Send + Sync {
    async fn generate_commit_message(&self, diff: &str) -> Result<String>;
}

/// The configured provider. Exactly one variant is active per run.
#[derive(Debug, Clone)]
pub enum Engine {
    /// Hosted chat completions, either OpenAI itself or a compatible server.
    OpenAi(OpenAiClient),
    Ollama(OllamaClient),
    Gemini(GeminiClient),
}

impl Engine {
    pub fn provider_name(&self) -> &'static str {
        match self {
            Self::OpenAi(_) => PROVIDER_OPENAI,
            Self::Ollama(_) => PROVIDER_OLLAMA,
            Self::Gemini(_) => PROVIDER_GEMINI,
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Self::OpenAi(c) => c.model(),
            Self::Ollama(c) => c.model(),
            Self::Gemini(c) => c.model(),
        }
    }

    /// Request URL without credentials.
    pub fn endpoint(&self) -> String {
        match self {
            Self::OpenAi(c) => c.url().to_string(),
            Self::Ollama(c) => c.endpoint().to_string(),
            Self::Gemini(c) => c.endpoint(),
        }
    }
}

#[async_trait]
impl CommitMessageGenerator for Engine {
    async fn generate_commit_message(&self, diff: &str) -> Result<String> {
        match self {
            Self::OpenAi(c) => c.generate_commit_message(diff).await,
            Self::Ollama(c) => c.generate_commit_message(diff).await,
            Self::Gemini(c) => c.generate_commit_message(diff).await,
        }
    }
}

/// Build the engine named by `config.provider`.
///
/// Only the discriminator is validated here; bad URLs or keys surface on the
/// first request.
pub fn select_provider(config: &AiConfig) -> Result<Engine> {
    let provider = config.provider.trim().to_lowercase();
    debug!(provider = %provider, "selecting provider");

    let engine = match provider.as_str() {
        PROVIDER_OPENAI => Engine::OpenAi(OpenAiClient::new(
            config.openai_api_key.as_deref(),
            config.openai_model.as_deref(),
            Some(OPENAI_CHAT_URL),
        )?),
        PROVIDER_OPENAI_COMPATIBLE => Engine::OpenAi(OpenAiClient::new(
            config.openai_api_key.as_deref(),
            config.openai_model.as_deref(),
            config.openai_base_url.as_deref(),
        )?),
        PROVIDER_OLLAMA => Engine::Ollama(OllamaClient::new(
            config.ollama_endpoint.as_deref(),
            config.ollama_model.as_deref(),
        )?),
        PROVIDER_GEMINI => Engine::Gemini(GeminiClient::new(
            config.gemini_api_key.as_deref(),
            config.gemini_model.as_deref(),
        )?),
        _ => return Err(WhisperError::UnsupportedProvider(config.provider.clone())),
    };

    debug!(
        provider = engine.provider_name(),
        model = engine.model(),
        endpoint = %engine.endpoint(),
        "provider ready"
    );
    Ok(engine)
}
