// src/cli.rs
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Overrides;

/// Holds a full chat-completions URL, never a bare `/v1` base.
pub const ENV_BASE_URL: &str = "GITWHISPER_BASE_URL";

#[derive(Parser)]
#[command(
    name = "gitwhisper",
    version,
    about = "Propose an AI-generated commit message for your staged changes",
    after_help = "EXAMPLES:
    gitwhisper                                  # same as `gitwhisper generate`
    gitwhisper generate --provider ollama --model codellama
    gitwhisper --provider gemini --api-key $KEY init
    gitwhisper config                           # show the resolved settings

PROVIDERS:
    openai              https://api.openai.com (default)
    openai-compatible   any chat-completions server, set with --base-url
    ollama              local server, set with --endpoint
    gemini              Google Generative Language API"
)]
pub struct Cli {
    #[command(flatten)]
    pub ai: AiArgs,

    /// Config file to use instead of ~/.gitwhisper.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct AiArgs {
    /// Which backend generates the message
    #[arg(
        long,
        global = true,
        env = "GITWHISPER_PROVIDER",
        value_parser = ["openai", "openai-compatible", "ollama", "gemini"]
    )]
    pub provider: Option<String>,

    /// API key for the selected provider
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Model for the selected provider
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Full chat-completions URL for `openai-compatible`,
    /// e.g. http://localhost:8080/v1/chat/completions
    #[arg(long, global = true, env = ENV_BASE_URL, value_name = "URL")]
    pub base_url: Option<String>,

    /// Ollama server address; `/api/generate` is appended when missing
    #[arg(long, global = true)]
    pub endpoint: Option<String>,
}

impl AiArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            provider: self.provider.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            endpoint: self.endpoint.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.provider.is_none()
            && self.api_key.is_none()
            && self.model.is_none()
            && self.base_url.is_none()
            && self.endpoint.is_none()
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Generate a commit message from staged changes (default)
    ///
    /// Shows the proposal and asks whether to commit it, edit it, or abort.
    Generate,

    /// Save the given provider options to the config file
    Init,

    /// Show the resolved configuration (keys are masked)
    Config,
}
