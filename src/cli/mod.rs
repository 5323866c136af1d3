//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod present;
mod process;
mod prompt;
mod tools;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

pub use present::{render_json, render_text};

#[derive(Parser)]
#[command(name = "procurescan")]
#[command(about = "Extract text from procurement documents and classify RFQs, POs and deliveries")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Files to process (prompted for when none are given)
    files: Vec<PathBuf>,

    /// Files to process (same as the positional arguments)
    #[arg(long = "files", num_args = 1.., value_name = "FILES")]
    files_flag: Vec<PathBuf>,

    /// Email subject to use for non-email files
    #[arg(long)]
    subject: Option<String>,

    /// Sender address to use for non-email files
    #[arg(long = "from", visible_alias = "from-email", alias = "from_email")]
    from_email: Option<String>,

    /// Print one JSON report per file instead of text
    #[arg(long)]
    json: bool,

    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Report whether pdftotext, pdftoppm and tesseract are available
    CheckTools,
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    if let Some(path) = &config.source_path {
        tracing::info!("Loaded config from {}", path.display());
    }

    match cli.command {
        Some(Commands::CheckTools) => tools::cmd_check_tools(&config),
        None => {
            let mut files = cli.files;
            files.extend(cli.files_flag);
            process::cmd_process(
                &config,
                files,
                cli.subject,
                cli.from_email,
                cli.json,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_files_and_overrides() {
        let cli = Cli::try_parse_from([
            "procurescan",
            "a.pdf",
            "--files",
            "b.txt",
            "c.eml",
            "--subject",
            "RFQ 9",
            "--from-email",
            "x@y.gov",
        ])
        .unwrap();
        assert_eq!(cli.files, vec![PathBuf::from("a.pdf")]);
        assert_eq!(
            cli.files_flag,
            vec![PathBuf::from("b.txt"), PathBuf::from("c.eml")]
        );
        assert_eq!(cli.subject.as_deref(), Some("RFQ 9"));
        assert_eq!(cli.from_email.as_deref(), Some("x@y.gov"));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_check_tools() {
        let cli = Cli::try_parse_from(["procurescan", "check-tools"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::CheckTools)));
    }
}
