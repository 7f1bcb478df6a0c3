//! Reading the passage to work on from the command line, a file or stdin.

use anyhow::{bail, Context, Result};
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;

/// Resolve the input text: inline argument first, then `--file`, then piped
/// stdin. Surrounding whitespace is stripped; blank input is an error.
pub fn read_input(text: Option<String>, file: Option<&Path>) -> Result<String> {
    let raw = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => read_stdin()?,
    };

    require_text(raw)
}

fn read_stdin() -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }

    let mut buffer = String::new();
    stdin
        .lock()
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    Ok(buffer)
}

fn require_text(raw: String) -> Result<String> {
    let text = raw.trim();
    if text.is_empty() {
        bail!("No text provided");
    }
    Ok(text.to_string())
}
