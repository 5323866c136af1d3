//! Interactive file selection when no paths are given on the command line.

use std::path::PathBuf;

use console::{style, Term};

/// Ask for file paths on the terminal, one per line, until an empty line.
/// Returns nothing when stdin is not interactive.
pub fn prompt_for_files() -> anyhow::Result<Vec<PathBuf>> {
    let term = Term::stdout();
    if !term.is_term() {
        return Ok(Vec::new());
    }

    term.write_line(&format!(
        "{} Select files to process (one path per line, empty line to finish):",
        style("?").cyan()
    ))?;

    let mut files = Vec::new();
    loop {
        let line = term.read_line()?;
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        files.push(PathBuf::from(shellexpand::tilde(line).as_ref()));
    }
    Ok(files)
}
