//! Process command: run each file through the pipeline and print its report.

use std::path::PathBuf;

use console::style;

use super::present::{render_json, render_text};
use super::prompt::prompt_for_files;
use crate::config::Config;
use crate::services::{process_file, Overrides};

/// Process files sequentially, printing a report for each.
pub fn cmd_process(
    config: &Config,
    mut files: Vec<PathBuf>,
    subject: Option<String>,
    from_email: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    if files.is_empty() {
        files = prompt_for_files()?;
    }
    if files.is_empty() {
        println!("{} No files selected. Exiting.", style("!").yellow());
        return Ok(());
    }

    let extractor = config.text_extractor();
    let overrides = Overrides {
        subject,
        sender: from_email,
    };

    for path in &files {
        let report = process_file(path, &overrides, &extractor);
        if json {
            println!("{}", render_json(&report)?);
        } else {
            println!("{}", render_text(&report));
        }
    }

    Ok(())
}
