//! `config.toml` settings. Every field has a default, so an absent file or section is
//! equivalent to an empty one.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::domain::normalize::{MarginPolicy, NormalizeOptions};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub normalize: NormalizeConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub path: Option<PathBuf>,
    /// Workbook sheet holding the invoice lines.
    pub sheet: String,
    /// Banner rows above the header row.
    pub skip_rows: usize,
    pub csv_delimiter: char,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: None,
            sheet: "BASE".to_string(),
            skip_rows: 2,
            csv_delimiter: ',',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    pub margin_policy: MarginPolicy,
    pub export_default: String,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        let options = NormalizeOptions::default();
        Self {
            margin_policy: options.margin_policy,
            export_default: options.export_default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub top_n: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { top_n: 10 }
    }
}

impl Config {
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("failed to parse config")?;
        if !config.source.csv_delimiter.is_ascii() {
            anyhow::bail!(
                "csv_delimiter must be a single ascii character, got {:?}",
                config.source.csv_delimiter
            );
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config: {}", path.display()))
    }

    /// Loads `explicit` when given; otherwise the default location if a file exists there,
    /// else built-in defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_config_path() {
            Ok(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            margin_policy: self.normalize.margin_policy,
            export_default: self.normalize.export_default.clone(),
        }
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "billing", "billing-report")
        .ok_or_else(|| anyhow!("unable to resolve config directory"))?;
    Ok(project_dirs.config_dir().join("config.toml"))
}
