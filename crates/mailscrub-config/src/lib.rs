use mailscrub_core::{Column, Field, ReportSource};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for mailscrub
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Replacement for every redacted span
    #[serde(default = "default_redaction_string")]
    pub redaction_string: String,

    /// Email addresses containing any of these strings are kept
    #[serde(default)]
    pub excludes: Vec<String>,

    /// SQLite file; the data directory is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    #[serde(default)]
    pub scrub: ScrubConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrubConfig {
    #[serde(default = "default_member_link_marker")]
    pub member_link_marker: String,

    #[serde(default = "default_section_phrase")]
    pub section_phrase: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_generation_root")]
    pub generation_root: PathBuf,

    #[serde(default)]
    pub source: ReportSource,

    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default = "default_columns")]
    pub columns: Vec<Column>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redaction_string: default_redaction_string(),
            excludes: Vec::new(),
            database: None,
            scrub: ScrubConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Default for ScrubConfig {
    fn default() -> Self {
        Self {
            member_link_marker: default_member_link_marker(),
            section_phrase: default_section_phrase(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            generation_root: default_generation_root(),
            source: ReportSource::default(),
            page_size: default_page_size(),
            columns: default_columns(),
        }
    }
}

fn default_redaction_string() -> String {
    "[REDACTED]".to_string()
}

fn default_member_link_marker() -> String {
    "?member=".to_string()
}

fn default_section_phrase() -> String {
    "Delivery address".to_string()
}

fn default_generation_root() -> PathBuf {
    PathBuf::from("generated")
}

fn default_page_size() -> u32 {
    1000
}

fn default_columns() -> Vec<Column> {
    vec![
        Column::new(Field::Id, "ID"),
        Column::new(Field::Subject, "Subject"),
        Column::new(Field::EmailFrom, "From"),
        Column::new(Field::EmailTo, "To"),
        Column::new(Field::Time, "Time"),
    ]
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            // Create default config file
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(&path, content)?;
            Ok(config)
        }
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.redaction_string.is_empty() {
            anyhow::bail!("redaction_string must not be empty");
        }
        if self.report.page_size == 0 {
            anyhow::bail!("report.page_size must be at least 1");
        }
        if self.report.columns.is_empty() {
            anyhow::bail!("report.columns must name at least one column");
        }
        Ok(())
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "mailscrub", "mailscrub") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.mailscrub/config.toml")
        }
    }
}
