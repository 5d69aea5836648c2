// src/main.rs
mod cli;
mod client;
mod commands;
mod config;
mod console;
mod error;
mod git;
mod progress;
mod prompts;
mod providers;
mod types;


use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::client::SUPPORTED_PROVIDERS;
use crate::commands::{cmd_config, cmd_generate, cmd_init, Outcome};
use crate::config::{AiConfig, Config, CONFIG_FILENAME};
use crate::error::WhisperError;

const EXIT_INTERRUPTED: u8 = 130;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn config_path(cli: &Cli) -> PathBuf {
    cli.config
        .clone()
        .or_else(Config::default_path)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME))
}

fn report_error(err: &anyhow::Error) {
    let line = console::one_line(&format!("Error: {err:#}"));
    eprintln!("{}", ::console::style(line).red());

    match err.downcast_ref::<WhisperError>() {
        Some(WhisperError::UnsupportedProvider(_)) => {
            eprintln!("Supported providers: {}", SUPPORTED_PROVIDERS.join(", "));
        }
        Some(e) if e.is_provider_error() => {
            eprintln!("Check the provider settings with `gitwhisper config`.");
        }
        _ => {}
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let path = config_path(&cli);
    let file = Config::load(&path)?;
    debug!(path = %path.display(), "loaded config");

    match cli.command.unwrap_or(Commands::Generate) {
        Commands::Init => {
            cmd_init(&cli.ai, &path, &file)?;
        }
        Commands::Config => {
            let ai = AiConfig::resolve(&cli.ai.overrides(), &file, |v| std::env::var(v).ok());
            cmd_config(&path, &ai);
        }
        Commands::Generate => {
            let ai = AiConfig::resolve(&cli.ai.overrides(), &file, |v| std::env::var(v).ok());
            debug!(provider = %ai.provider, "resolved provider");
            let outcome = cmd_generate(&ai).await?;
            if outcome == Outcome::Interrupted {
                return Ok(ExitCode::from(EXIT_INTERRUPTED));
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}
