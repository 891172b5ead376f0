//! Static configuration of a publishing run.
//!
//! Loaded from a TOML file; every field falls back to the built-in value so a
//! missing file or an empty table yields the default conference setup.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, ToolError};
use crate::model::{ConferenceDays, IconMap};

/// Configuration for one publishing run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub conference_days: ConferenceDays,

    #[serde(default)]
    pub icons: IconMap,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    #[serde(default = "default_url")]
    pub url: String,

    /// Sheet names, in the order their rows are concatenated.
    #[serde(default = "default_sheets")]
    pub sheets: Vec<String>,

    /// Environment variable holding the OAuth access token.
    #[serde(default = "default_token_env")]
    pub token_env: String,

    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_url() -> String {
    "https://docs.google.com/spreadsheets/d/105IOc5wUjvvK6RwTtd0WBdbVyFUMVvL-1-e7bHFlNjE".to_string()
}

fn default_sheets() -> Vec<String> {
    ["GCPR", "VMV", "VCBM", "JOINT"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_token_env() -> String {
    "GOOGLE_SHEETS_TOKEN".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            sheets: default_sheets(),
            token_env: default_token_env(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,

    /// Slide directory, relative to [`OutputConfig::directory`].
    #[serde(default = "default_slides_directory")]
    pub slides_directory: PathBuf,
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("program_output")
}

fn default_slides_directory() -> PathBuf {
    PathBuf::from("slides")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            slides_directory: default_slides_directory(),
        }
    }
}

impl OutputConfig {
    pub fn slides_path(&self) -> PathBuf {
        self.directory.join(&self.slides_directory)
    }
}

impl Config {
    /// Reads and validates the configuration at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ToolError::MissingInput(path.to_path_buf()));
        }
        let source = fs::read_to_string(path)?;
        Self::from_toml(&source)
    }

    pub fn from_toml(source: &str) -> Result<Self> {
        let config: Config = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.source.sheets.is_empty() {
            return Err(ToolError::Config("at least one sheet is required".into()));
        }
        if self.conference_days.is_empty() {
            return Err(ToolError::Config(
                "at least one conference day is required".into(),
            ));
        }
        let mut seen = HashSet::new();
        for day in self.conference_days.iter() {
            if !seen.insert(day) {
                return Err(ToolError::Config(format!("duplicate conference day '{day}'")));
            }
        }
        let mut seen = HashSet::new();
        for sheet in &self.source.sheets {
            if !seen.insert(sheet) {
                return Err(ToolError::Config(format!("duplicate sheet '{sheet}'")));
            }
        }
        Ok(())
    }
}
