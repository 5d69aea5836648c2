// src/commands/generate.rs
use std::future::Future;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::info;

use crate::client::{select_provider, CommitMessageGenerator};
use crate::config::AiConfig;
use crate::console::{self, CommitDecision, Console, CONFIRM_PROMPT, EDIT_PROMPT};
use crate::error::{Result, WhisperError};
use crate::git::{DiffSource, GitCli};
use crate::progress::{self, generate_with_progress, Completion, Spinner, GENERATING_MESSAGE};

pub const NO_CHANGES_MESSAGE: &str = "No staged changes found. Run 'git add' first.";
pub const COMMITTED_MESSAGE: &str = "Commit successful!";
pub const DECLINED_MESSAGE: &str = "Commit aborted.";
pub const EMPTY_EDIT_MESSAGE: &str = "Commit aborted (empty message).";
pub const INTERRUPTED_MESSAGE: &str = "Interrupted; nothing was committed.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// Answered anything other than `y` or `e`.
    Declined,
    /// Chose to edit, then entered nothing.
    EmptyMessage,
}

/// Terminal states of a run that are not failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    NoChanges,
    Committed(String),
    Aborted(AbortReason),
    Interrupted,
}

/// One pass of check → diff → generate → confirm → commit.
///
/// `select` is only called once there is something to generate a message
/// for, so an empty diff never touches the network.
///
/// `interrupt` is called once per stage that waits on something (generation,
/// then each prompt); whichever future it returns resolving ends the run with
/// [`Outcome::Interrupted`].
pub async fn run<D, G, F, N, I, R, W>(
    source: &D,
    select: F,
    console: &mut Console<R, W>,
    spinner: Spinner,
    mut interrupt: N,
) -> Result<Outcome>
where
    D: DiffSource,
    G: CommitMessageGenerator + ?Sized + 'static,
    F: FnOnce() -> Result<Arc<G>>,
    N: FnMut() -> I,
    I: Future<Output = ()>,
    R: BufRead + Send + 'static,
    W: Write,
{
    if !source.is_repository() {
        return Err(WhisperError::NotARepository);
    }

    let diff = source.staged_diff()?;
    if diff.is_empty() {
        info!("nothing staged");
        return Ok(Outcome::NoChanges);
    }

    let generator = select()?;
    info!(bytes = diff.len(), "generating commit message");

    let message = match generate_with_progress(generator, diff, spinner, interrupt()).await {
        Completion::Finished(result) => result?,
        Completion::Interrupted => return Ok(Outcome::Interrupted),
    };

    console.show_proposal(&message)?;
    console.info("")?;

    let Some(answer) = console.ask(CONFIRM_PROMPT, interrupt()).await? else {
        return interrupted_at_prompt(console);
    };
    let message = match CommitDecision::parse(&answer) {
        CommitDecision::Accept => message,
        CommitDecision::Edit => {
            let Some(edited) = console.ask(EDIT_PROMPT, interrupt()).await? else {
                return interrupted_at_prompt(console);
            };
            if edited.is_empty() {
                return Ok(Outcome::Aborted(AbortReason::EmptyMessage));
            }
            edited
        }
        CommitDecision::Abort => return Ok(Outcome::Aborted(AbortReason::Declined)),
    };

    source.commit(&message)?;
    Ok(Outcome::Committed(message))
}

fn interrupted_at_prompt<R, W>(console: &mut Console<R, W>) -> Result<Outcome>
where
    R: BufRead + Send + 'static,
    W: Write,
{
    // End the unanswered prompt line.
    console.info("")?;
    Ok(Outcome::Interrupted)
}

/// Print the line that goes with a finished run.
pub fn report<R, W>(console: &mut Console<R, W>, outcome: &Outcome) -> Result<()>
where
    R: BufRead + Send + 'static,
    W: Write,
{
    match outcome {
        Outcome::NoChanges => console.notice(NO_CHANGES_MESSAGE)?,
        Outcome::Committed(message) => {
            info!(subject = message.lines().next().unwrap_or_default(), "committed");
            console.success(COMMITTED_MESSAGE)?
        }
        Outcome::Aborted(AbortReason::Declined) => console.info(DECLINED_MESSAGE)?,
        Outcome::Aborted(AbortReason::EmptyMessage) => console.info(EMPTY_EDIT_MESSAGE)?,
        Outcome::Interrupted => console.notice(INTERRUPTED_MESSAGE)?,
    }
    Ok(())
}

/// `generate` against the current directory, the real terminal and the
/// configured provider.
pub async fn cmd_generate(ai: &AiConfig) -> Result<Outcome> {
    let git = GitCli::new();
    let mut console = console::stdio();

    let outcome = run(
        &git,
        || Ok(Arc::new(select_provider(ai)?)),
        &mut console,
        Spinner::new(GENERATING_MESSAGE),
        progress::ctrl_c,
    )
    .await?;

    report(&mut console, &outcome)?;
    Ok(outcome)
}
