//! Configuration management for procurescan.
//!
//! Config files are discovered in the working directory and the user config
//! directory, parsed by extension (TOML, YAML or JSON), then overlaid with
//! environment variables.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extract::TextExtractor;

/// Application name used for config discovery.
const APP_NAME: &str = "procurescan";

/// Extensions tried during discovery, in order.
const CONFIG_EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {}", .0.display(), .1)]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

/// User configuration for the extraction tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tesseract language code(s), e.g. `eng` or `eng+deu`.
    pub tesseract_lang: String,
    /// DPI used when rasterizing PDF pages for OCR.
    pub ocr_dpi: u32,
    /// Allow OCR for images and text-less PDFs.
    pub ocr_enabled: bool,
    /// Directory containing pdftotext/pdftoppm/tesseract. Uses PATH when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_dir: Option<String>,
    /// File the config was loaded from.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tesseract_lang: "eng".to_string(),
            ocr_dpi: 300,
            ocr_enabled: true,
            tool_dir: None,
            source_path: None,
        }
    }
}

impl Config {
    /// Load configuration: explicit path, else discovery, else defaults.
    /// Environment overrides are applied last.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match explicit {
            Some(path) => Self::load_from_path(path)?,
            None => Self::discover(),
        };
        Ok(config.with_env_overrides())
    }

    /// Search standard locations for a config file.
    fn discover() -> Self {
        for path in candidate_paths() {
            if !path.is_file() {
                continue;
            }
            tracing::debug!("Found config file: {}", path.display());
            match Self::load_from_path(&path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Ignoring config {}: {}", path.display(), e);
                    return Self::default();
                }
            }
        }
        Self::default()
    }

    /// Load configuration from a specific file path.
    /// The format is chosen from the file extension; JSON is the fallback.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let mut config: Config = match ext {
            "toml" => toml::from_str(&contents)?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)?,
            _ => serde_json::from_str(&contents)?,
        };

        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Apply `PROCURESCAN_*` environment variables.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(lang) = env_var("PROCURESCAN_TESSERACT_LANG") {
            self.tesseract_lang = lang;
        }
        if let Some(dpi) = env_var("PROCURESCAN_OCR_DPI") {
            match dpi.parse() {
                Ok(dpi) => self.ocr_dpi = dpi,
                Err(_) => tracing::warn!("Ignoring invalid PROCURESCAN_OCR_DPI: {}", dpi),
            }
        }
        if let Some(flag) = env_var("PROCURESCAN_DISABLE_OCR") {
            if flag.eq_ignore_ascii_case("1") || flag.eq_ignore_ascii_case("true") {
                self.ocr_enabled = false;
            }
        }
        if let Some(dir) = env_var("PROCURESCAN_TOOL_DIR") {
            self.tool_dir = Some(dir);
        }
        self
    }

    /// Resolve the tool directory: `~` is expanded and relative paths are
    /// taken from the config file's directory (or the CWD).
    pub fn resolved_tool_dir(&self) -> Option<PathBuf> {
        let raw = self.tool_dir.as_deref()?;
        let expanded = shellexpand::tilde(raw);
        let path = Path::new(expanded.as_ref());
        if path.is_absolute() {
            return Some(path.to_path_buf());
        }
        let base = self
            .source_path
            .as_ref()
            .and_then(|p| p.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        Some(base.join(path))
    }

    /// Build the text extractor described by this config.
    pub fn text_extractor(&self) -> TextExtractor {
        TextExtractor::new()
            .with_language(&self.tesseract_lang)
            .with_dpi(self.ocr_dpi)
            .with_ocr(self.ocr_enabled)
            .with_tool_dir(self.resolved_tool_dir())
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Candidate config files: `./procurescan.<ext>`, then
/// `<config_dir>/procurescan/config.<ext>`.
fn candidate_paths() -> Vec<PathBuf> {
    let local = CONFIG_EXTENSIONS
        .iter()
        .map(|ext| PathBuf::from(format!("{}.{}", APP_NAME, ext)));
    let user = dirs::config_dir()
        .map(|dir| dir.join(APP_NAME))
        .into_iter()
        .flat_map(|dir| {
            CONFIG_EXTENSIONS
                .iter()
                .map(move |ext| dir.join(format!("config.{}", ext)))
        });
    local.chain(user).collect()
}
