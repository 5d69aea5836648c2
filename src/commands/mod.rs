// src/commands/mod.rs
mod config;
pub mod generate;

pub use config::{cmd_config, cmd_init};
pub use generate::{cmd_generate, Outcome};
