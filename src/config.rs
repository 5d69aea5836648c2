// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::client::{PROVIDER_GEMINI, PROVIDER_OLLAMA, PROVIDER_OPENAI, PROVIDER_OPENAI_COMPATIBLE};

pub const CONFIG_FILENAME: &str = ".gitwhisper.toml";
pub const DEFAULT_PROVIDER: &str = PROVIDER_OPENAI;

pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_OLLAMA_HOST: &str = "OLLAMA_HOST";

// =============================================================================
// PROVIDER SETTINGS
// =============================================================================

/// Everything the engine selector needs. Also the shape of the `[ai]` table.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default)]
    pub provider: String,
    pub openai_api_key: Option<String>,
    pub openai_model: Option<String>,
    pub openai_base_url: Option<String>,
    pub ollama_endpoint: Option<String>,
    pub ollama_model: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
}

impl AiConfig {
    /// Human-readable listing with credentials masked.
    pub fn display(&self) -> String {
        let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "(default)".into());
        let secret = |v: &Option<String>| match v.as_deref() {
            Some(k) if !k.is_empty() => mask_secret(k),
            _ => "(not set)".into(),
        };
        let provider = if self.provider.is_empty() { DEFAULT_PROVIDER } else { &self.provider };

        [
            format!("provider        = {}", provider),
            format!("openai_api_key  = {}", secret(&self.openai_api_key)),
            format!("openai_model    = {}", show(&self.openai_model)),
            format!("openai_base_url = {}", show(&self.openai_base_url)),
            format!("ollama_endpoint = {}", show(&self.ollama_endpoint)),
            format!("ollama_model    = {}", show(&self.ollama_model)),
            format!("gemini_api_key  = {}", secret(&self.gemini_api_key)),
            format!("gemini_model    = {}", show(&self.gemini_model)),
        ]
        .join("\n")
    }
}

pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 8 {
        "****".into()
    } else {
        format!("{}****", visible)
    }
}

// =============================================================================
// CONFIG FILE
// =============================================================================
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ai: AiConfig,
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(CONFIG_FILENAME))
    }

    /// A missing file is an empty config; an unreadable or malformed one is an
    /// error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}

// =============================================================================
// RESOLUTION
// =============================================================================

/// Values given on the command line (or through their clap env vars).
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub provider: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub endpoint: Option<String>,
}

impl AiConfig {
    /// Merge overrides > config file > provider env vars > defaults.
    ///
    /// `--api-key` and `--model` land on the fields of whichever provider ends
    /// up selected.
    pub fn resolve(cli: &Overrides, file: &Config, env: impl Fn(&str) -> Option<String>) -> Self {
        let mut ai = file.ai.clone();

        ai.provider = cli
            .provider
            .clone()
            .filter(|p| !p.trim().is_empty())
            .or_else(|| Some(ai.provider.clone()).filter(|p| !p.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_PROVIDER.to_string());

        match ai.provider.trim().to_lowercase().as_str() {
            PROVIDER_OPENAI | PROVIDER_OPENAI_COMPATIBLE => {
                override_field(&mut ai.openai_api_key, &cli.api_key);
                override_field(&mut ai.openai_model, &cli.model);
            }
            PROVIDER_GEMINI => {
                override_field(&mut ai.gemini_api_key, &cli.api_key);
                override_field(&mut ai.gemini_model, &cli.model);
            }
            PROVIDER_OLLAMA => override_field(&mut ai.ollama_model, &cli.model),
            _ => {}
        }
        override_field(&mut ai.openai_base_url, &cli.base_url);
        override_field(&mut ai.ollama_endpoint, &cli.endpoint);

        fallback_field(&mut ai.openai_api_key, env(ENV_OPENAI_API_KEY));
        fallback_field(&mut ai.gemini_api_key, env(ENV_GEMINI_API_KEY));
        fallback_field(&mut ai.ollama_endpoint, env(ENV_OLLAMA_HOST));

        ai
    }
}

fn override_field(field: &mut Option<String>, value: &Option<String>) {
    if value.is_some() {
        field.clone_from(value);
    }
}

fn fallback_field(field: &mut Option<String>, value: Option<String>) {
    if field.as_deref().map_or(true, |v| v.trim().is_empty()) {
        if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
            *field = Some(v);
        }
    }
}
