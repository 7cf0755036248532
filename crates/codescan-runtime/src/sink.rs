//! Delivery of an accepted code: clipboard copy, then display.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::scan_loop::Accepted;

/// Receives the accepted code exactly once per session.
pub trait Sink {
    fn deliver(&mut self, accepted: &Accepted);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Clipboard helpers tried in order until one succeeds.
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
    ("clip", &[]),
];

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("no clipboard command succeeded (tried: {0})")]
    Unavailable(String),
}

/// Pipe `text` into the first clipboard command that accepts it.
/// Returns the program that succeeded.
pub fn copy_to_clipboard(text: &str) -> Result<&'static str, ClipboardError> {
    copy_with(CLIPBOARD_COMMANDS, text)
}

fn copy_with(
    commands: &[(&'static str, &[&str])],
    text: &str,
) -> Result<&'static str, ClipboardError> {
    for &(program, args) in commands {
        match pipe_into(program, args, text) {
            Ok(()) => return Ok(program),
            Err(e) => tracing::debug!("clipboard via {program} failed: {e}"),
        }
    }
    let tried: Vec<&str> = commands.iter().map(|(p, _)| *p).collect();
    Err(ClipboardError::Unavailable(tried.join(", ")))
}

fn pipe_into(program: &str, args: &[&str], text: &str) -> std::io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };
    let status = child.wait()?;
    if !status.success() {
        return Err(std::io::Error::other(format!("exit status {status}")));
    }
    written
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

/// Copies the bare digits to the clipboard (optional) and always writes
/// the result to `out`, whether or not the copy worked.
pub struct ClipboardSink<W: Write> {
    out: W,
    clipboard: bool,
    format: OutputFormat,
}

impl<W: Write> ClipboardSink<W> {
    pub fn new(out: W, clipboard: bool, format: OutputFormat) -> Self {
        Self {
            out,
            clipboard,
            format,
        }
    }

    fn render(&self, accepted: &Accepted) -> String {
        match self.format {
            OutputFormat::Text => accepted.grouped.clone(),
            OutputFormat::Json => serde_json::to_string(accepted)
                .unwrap_or_else(|e| error_json(&e.to_string())),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Sink for ClipboardSink<W> {
    fn deliver(&mut self, accepted: &Accepted) {
        if self.clipboard {
            match copy_to_clipboard(accepted.code.as_str()) {
                Ok(program) => tracing::info!("copied to clipboard via {program}"),
                Err(e) => tracing::warn!("{e}"),
            }
        }
        let line = self.render(accepted);
        if let Err(e) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            tracing::error!("failed to write result: {e}");
        }
    }
}
