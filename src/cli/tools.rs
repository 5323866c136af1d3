//! Check-tools command.

use console::style;

use crate::config::Config;
use crate::extract::check_tools;

/// Report availability of the external binaries used for PDF and OCR extraction.
pub fn cmd_check_tools(config: &Config) -> anyhow::Result<()> {
    let tool_dir = config.resolved_tool_dir();
    if let Some(dir) = &tool_dir {
        println!("Tool directory: {}", dir.display());
    }

    for tool in check_tools(tool_dir.as_deref()) {
        if tool.available {
            println!("  {} {}", style("✓").green(), tool.name);
        } else {
            println!("  {} {} (not found)", style("✗").red(), tool.name);
        }
    }

    if !config.ocr_enabled {
        println!("{} OCR is disabled in configuration", style("!").yellow());
    }

    Ok(())
}
