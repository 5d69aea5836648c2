// src/console.rs
use console::{measure_text_width, style, Style};
use std::future::Future;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

pub const CONFIRM_PROMPT: &str = "Commit with this message? (y/n/e[dit]): ";
pub const EDIT_PROMPT: &str = "Enter new commit message: ";

// =============================================================================
// COMMIT DECISION
// =============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitDecision {
    Accept,
    Edit,
    Abort,
}

impl CommitDecision {
    /// `y` accepts, `e` edits, anything else (empty included) aborts.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "y" => Self::Accept,
            "e" => Self::Edit,
            _ => Self::Abort,
        }
    }
}

// =============================================================================
// CONSOLE
// =============================================================================

/// Line-oriented terminal I/O for the confirmation dialog.
///
/// Answers are read on a separate thread so a pending read can lose a race
/// against Ctrl-C. The input sits behind a mutex for that reason.
pub struct Console<R, W> {
    input: Arc<Mutex<R>>,
    output: W,
}

pub fn stdio() -> Console<BufReader<Stdin>, Stdout> {
    Console::new(BufReader::new(io::stdin()), io::stdout())
}

impl<R, W> Console<R, W>
where
    R: BufRead + Send + 'static,
    W: Write,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input: Arc::new(Mutex::new(input)), output }
    }

    /// Print `prompt` and read one trimmed line. EOF reads as an empty line.
    ///
    /// Returns `None` if `interrupt` resolves first; the abandoned read is
    /// left to finish (or die with the process) on its own thread.
    pub async fn ask<I>(&mut self, prompt: &str, interrupt: I) -> io::Result<Option<String>>
    where
        I: Future<Output = ()>,
    {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let input = Arc::clone(&self.input);
        let (tx, rx) = oneshot::channel();
        std::thread::spawn(move || {
            let _ = tx.send(read_answer(&input));
        });

        tokio::pin!(interrupt);
        tokio::select! {
            biased;
            _ = &mut interrupt => Ok(None),
            answer = rx => match answer {
                Ok(line) => line.map(Some),
                Err(_) => Err(io::Error::other("console reader stopped")),
            },
        }
    }

    pub fn show_proposal(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", render_box(message))
    }

    pub fn notice(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", style(message).yellow())
    }

    pub fn success(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", style(message).green())
    }

    pub fn info(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

fn read_answer<R: BufRead>(input: &Mutex<R>) -> io::Result<String> {
    let mut input = input.lock().map_err(|_| io::Error::other("console input poisoned"))?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Collapse a possibly multi-line message (git output, response bodies) onto
/// one line.
pub fn one_line(message: &str) -> String {
    message
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rounded border, one blank row and two columns of padding around the text.
pub fn render_box(message: &str) -> String {
    let border = Style::new().color256(63);
    let text = Style::new().color256(86);

    let lines: Vec<&str> = if message.is_empty() { vec![""] } else { message.lines().collect() };
    let width = lines.iter().map(|l| measure_text_width(l)).max().unwrap_or(0);
    let inner = width + 4;

    let mut out = Vec::with_capacity(lines.len() + 4);
    out.push(border.apply_to(format!("╭{}╮", "─".repeat(inner))).to_string());
    out.push(format!("{0}{1}{0}", border.apply_to("│"), " ".repeat(inner)));
    for line in &lines {
        let pad = width - measure_text_width(line);
        out.push(format!(
            "{0}  {1}{2}  {0}",
            border.apply_to("│"),
            text.apply_to(line),
            " ".repeat(pad)
        ));
    }
    out.push(format!("{0}{1}{0}", border.apply_to("│"), " ".repeat(inner)));
    out.push(border.apply_to(format!("╰{}╯", "─".repeat(inner))).to_string());
    out.join("\n")
}
