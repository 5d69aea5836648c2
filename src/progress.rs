// src/progress.rs
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::client::CommitMessageGenerator;
use crate::error::Result;

pub const TICK_INTERVAL: Duration = Duration::from_millis(100);
pub const GENERATING_MESSAGE: &str = "Generating commit message...";

const DOT_FRAMES: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷", ""];

/// How a generation run under the spinner ended.
#[derive(Debug)]
pub enum Completion {
    Finished(Result<String>),
    Interrupted,
}

/// Terminal spinner advanced one frame per tick of the progress loop.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.205} {msg}")
                .map(|s| s.tick_strings(DOT_FRAMES))
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        Self { bar }
    }

    /// Draws nothing.
    pub fn hidden() -> Self {
        Self { bar: ProgressBar::hidden() }
    }

    fn tick(&self) {
        self.bar.tick();
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Resolves on Ctrl-C. Never resolves if the handler can't be installed.
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Run one generation on its own task while this task animates `spinner`.
///
/// The generation task reports back exactly once over a oneshot channel. If
/// `interrupt` resolves first the task is aborted and nothing is returned.
pub async fn generate_with_progress<G, I>(
    generator: Arc<G>,
    diff: String,
    spinner: Spinner,
    interrupt: I,
) -> Completion
where
    G: CommitMessageGenerator + ?Sized + 'static,
    I: Future<Output = ()>,
{
    let (tx, mut rx) = oneshot::channel();
    let mut task = tokio::spawn(async move {
        let result = generator.generate_commit_message(&diff).await;
        let _ = tx.send(result);
    });

    let mut ticker = tokio::time::interval(TICK_INTERVAL);
    tokio::pin!(interrupt);

    loop {
        tokio::select! {
            received = &mut rx => {
                spinner.finish();
                return match received {
                    Ok(result) => Completion::Finished(result),
                    // The sender only disappears unsent if the task panicked.
                    Err(_) => match (&mut task).await {
                        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                        _ => Completion::Interrupted,
                    },
                };
            }
            _ = ticker.tick() => spinner.tick(),
            _ = &mut interrupt => {
                debug!("interrupted while generating; aborting request");
                task.abort();
                spinner.finish();
                return Completion::Interrupted;
            }
        }
    }
}
