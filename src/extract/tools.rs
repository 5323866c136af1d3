//! Helpers for the external Poppler and Tesseract binaries.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};

use super::ExtractionError;

/// Binaries the PDF and image extractors shell out to.
pub const REQUIRED_TOOLS: [&str; 3] = ["pdftotext", "pdftoppm", "tesseract"];

/// Resolve a tool name, preferring an explicitly configured directory.
pub fn tool_path(name: &str, tool_dir: Option<&Path>) -> PathBuf {
    match tool_dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

/// Check if a binary is available in the tool directory or PATH.
pub fn check_binary(name: &str, tool_dir: Option<&Path>) -> bool {
    match tool_dir {
        Some(dir) => dir.join(name).is_file(),
        None => which::which(name).is_ok(),
    }
}

/// Availability of one external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    pub name: &'static str,
    pub available: bool,
}

/// Check if required tools are available.
pub fn check_tools(tool_dir: Option<&Path>) -> Vec<ToolStatus> {
    REQUIRED_TOOLS
        .iter()
        .map(|&name| ToolStatus {
            name,
            available: check_binary(name, tool_dir),
        })
        .collect()
}

/// Handle command output, extracting stdout on success or returning appropriate error.
pub fn handle_cmd_output(
    result: std::io::Result<Output>,
    tool_name: &str,
    error_prefix: &str,
) -> Result<String, ExtractionError> {
    match result {
        Ok(output) => {
            if output.status.success() {
                Ok(String::from_utf8_lossy(&output.stdout).to_string())
            } else {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(ExtractionError::ExtractionFailed(format!(
                    "{}: {}",
                    error_prefix,
                    stderr.trim()
                )))
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ExtractionError::ToolNotFound(tool_name.to_string()))
        }
        Err(e) => Err(ExtractionError::Io(e)),
    }
}

/// Check command status, returning appropriate error on failure.
pub fn check_cmd_status(
    result: std::io::Result<ExitStatus>,
    tool_name: &str,
    error_msg: &str,
) -> Result<(), ExtractionError> {
    match result {
        Ok(s) if s.success() => Ok(()),
        Ok(_) => Err(ExtractionError::ExtractionFailed(error_msg.to_string())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ExtractionError::ToolNotFound(tool_name.to_string()))
        }
        Err(e) => Err(ExtractionError::Io(e)),
    }
}
