use std::fs;
use std::io::{self, IsTerminal};
use std::path::Path;

use anyhow::{Context, Result};

/// Returns `true` if stderr is a terminal (interactive).
pub fn stderr_is_tty() -> bool {
    io::stderr().is_terminal()
}

/// Reads a whole text file, naming `what` in the error context.
pub fn read_text(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read {what}: {}", path.display()))
}
