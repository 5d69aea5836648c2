// src/commands/config.rs
use anyhow::{bail, Result};
use std::path::Path;

use crate::cli::AiArgs;
use crate::config::{AiConfig, Config};

/// Persist the provider options given on the command line.
///
/// `--provider` and `--base-url` may have been filled by clap from
/// `GITWHISPER_PROVIDER` / `GITWHISPER_BASE_URL`; those are saved as given.
/// The provider fallbacks (`OPENAI_API_KEY`, `GEMINI_API_KEY`, `OLLAMA_HOST`)
/// are not consulted, so API keys from the environment never reach the file.
pub fn cmd_init(args: &AiArgs, path: &Path, file: &Config) -> Result<Config> {
    if args.is_empty() {
        bail!("Nothing to save. Pass --provider, --api-key, --model, --base-url or --endpoint.");
    }

    let config = Config {
        ai: AiConfig::resolve(&args.overrides(), file, |_| None),
    };
    config.save(path)?;
    println!("Config saved to: {}", path.display());
    Ok(config)
}

pub fn cmd_config(path: &Path, ai: &AiConfig) {
    let state = if path.exists() { "" } else { " (not found, using defaults)" };
    println!("Config file: {}{}", path.display(), state);
    println!();
    println!("{}", ai.display());
}
