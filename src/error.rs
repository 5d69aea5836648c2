// src/error.rs
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WhisperError>;

/// Every way a single `generate` run can fail.
///
/// "Nothing staged" and "user aborted" are not errors; see
/// [`crate::commands::Outcome`].
#[derive(Error, Debug)]
pub enum WhisperError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Failed to execute git: {0}")]
    GitUnavailable(#[source] std::io::Error),

    #[error("Failed to get staged diff ({status}): {output}")]
    DiffRetrievalFailed { status: String, output: String },

    #[error("unsupported provider: {0}")]
    UnsupportedProvider(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to parse {provider} response: {source}")]
    InvalidResponse {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("No response content from {provider}")]
    EmptyResponse { provider: &'static str },

    #[error("Commit failed ({status}): {output}")]
    CommitFailed { status: String, output: String },

    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl WhisperError {
    /// True for failures that came back from the provider rather than git or
    /// the console.
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            Self::Transport(_)
                | Self::HttpStatus { .. }
                | Self::InvalidResponse { .. }
                | Self::EmptyResponse { .. }
        )
    }
}
