//! Application configuration for dotdoc.
//!
//! Project config lives at `./dotdoc.toml`, next to the Sphinx sources.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DotdocError, Result};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "dotdoc.toml";

/// Where Doxygen writes its HTML output (and the `.dot` sources beside it).
pub const DEFAULT_INPUT_DIR: &str = "_build/doxygen-html";

/// The reStructuredText document included by the Sphinx build.
pub const DEFAULT_OUTPUT_FILE: &str = "generated_diagrams.rst";

// ---------------------------------------------------------------------------
// Config structs (matching dotdoc.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Diagram import settings.
    #[serde(default)]
    pub import: ImportSection,
}

/// `[import]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSection {
    /// Directory scanned recursively for `.dot` files.
    #[serde(default = "default_input_dir")]
    pub input_dir: String,

    /// Destination of the aggregated document.
    #[serde(default = "default_output_file")]
    pub output_file: String,
}

impl Default for ImportSection {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_file: default_output_file(),
        }
    }
}

fn default_input_dir() -> String {
    DEFAULT_INPUT_DIR.into()
}
fn default_output_file() -> String {
    DEFAULT_OUTPUT_FILE.into()
}

// ---------------------------------------------------------------------------
// Import config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime import configuration, passed explicitly into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// Root of the Doxygen output tree.
    pub input_dir: PathBuf,
    /// File the aggregated document is written to.
    pub output_file: PathBuf,
}

impl ImportConfig {
    /// Apply CLI overrides on top of file/default values.
    pub fn with_overrides(mut self, input_dir: Option<PathBuf>, output_file: Option<PathBuf>) -> Self {
        if let Some(dir) = input_dir {
            self.input_dir = dir;
        }
        if let Some(file) = output_file {
            self.output_file = file;
        }
        self
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ImportConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            input_dir: PathBuf::from(&config.import.input_dir),
            output_file: PathBuf::from(&config.import.output_file),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Path of the config file inside `dir`.
pub fn config_file_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Load `dotdoc.toml` from the working directory. Returns defaults if it does not exist.
pub fn load_config() -> Result<AppConfig> {
    let cwd = std::env::current_dir().map_err(|e| DotdocError::io(".", e))?;
    load_config_in(&cwd)
}

/// Load `dotdoc.toml` from `dir`. Returns defaults if it does not exist.
pub fn load_config_in(dir: &Path) -> Result<AppConfig> {
    let path = config_file_path(dir);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DotdocError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        DotdocError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Write a default config file into `dir`.
/// Returns the path to the created file. An existing file is left untouched.
pub fn init_config(dir: &Path) -> Result<PathBuf> {
    let path = config_file_path(dir);
    if path.exists() {
        return Err(DotdocError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| DotdocError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DotdocError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
