use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::utilities::database::init::validate_table_name;

pub const SETTINGS_FILE: &str = "Settings.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub database: DatabaseConfig,
    pub extraction: ExtractionConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
    pub user_agent: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: "https://www.warwyn.tas.gov.au/planning-and-development/advertised-permits/"
                .to_string(),
            user_agent: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub table: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "data.sqlite".to_string(),
            table: "waratah_wynyard".to_string(),
        }
    }
}

/// Which part of a result row the permit fields are mined from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Text of the file title element plus the file modified date.
    #[default]
    FileTitle,
    /// `title` attribute of the download link.
    TitleAttribute,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub strategy: Strategy,
    pub row_selector: String,
    pub link_selector: String,
    pub title_selector: String,
    pub modified_selector: String,
    pub notice_period_days: u32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::FileTitle,
            row_selector: ".wpfd-search-result".to_string(),
            link_selector: ".wpfd_downloadlink".to_string(),
            title_selector: ".file_title".to_string(),
            modified_selector: ".file_modified".to_string(),
            notice_period_days: 14,
        }
    }
}

/// Loads `Settings.toml` from the working directory, then `APP_` environment
/// overrides (`APP_DATABASE__PATH=...`). Both sources are optional.
pub fn load_config() -> Result<AppConfig> {
    load_config_from(Path::new(SETTINGS_FILE))
}

pub fn load_config_from(settings_path: &Path) -> Result<AppConfig> {
    let settings = Config::builder()
        .add_source(
            File::new(&settings_path.to_string_lossy(), FileFormat::Toml).required(false),
        )
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .with_context(|| format!("Failed to read settings from {}", settings_path.display()))?;

    let app_config = settings
        .try_deserialize::<AppConfig>()
        .context("Failed to parse settings")?;

    validate_table_name(&app_config.database.table)?;

    Ok(app_config)
}
