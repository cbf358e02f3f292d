//! Layered configuration for Archivist.
//!
//! Sources, later ones overriding earlier ones:
//! - Bundled defaults (include_str! from archivist.toml)
//! - User config in ~/.config/archivist/archivist.toml
//! - ./archivist.toml
//! - `ARCHIVIST_*` environment variables, with `__` between nested keys

use archivist_core::LimitConfig;
use archivist_error::{ArchivistError, ArchivistResult, ConfigError, ConfigErrorKind};
use chrono_tz::Tz;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../archivist.toml");

/// Keywords that mark a query as being about a known topic.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TopicConfig {
    /// Matched case-insensitively against query words, in order
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

fn default_keywords() -> Vec<String> {
    [
        "apartheid",
        "soweto",
        "1976",
        "mandela",
        "anc",
        "struggle",
        "colonial",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for TopicConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
        }
    }
}

/// Where usage records are kept.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory for the filesystem store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Top-level Archivist configuration.
///
/// # Example
///
/// ```no_run
/// use archivist_tier::ArchivistConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ArchivistConfig::load()?;
/// println!("Daily queries: {}", config.limits.daily_queries());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArchivistConfig {
    /// Timezone whose midnight ends the usage day
    #[serde(default = "default_timezone")]
    pub timezone: Tz,

    /// Daily allowances and word budgets
    #[serde(default)]
    pub limits: LimitConfig,

    /// Topic keywords
    #[serde(default)]
    pub topics: TopicConfig,

    /// Usage storage
    #[serde(default)]
    pub storage: StorageConfig,
}

fn default_timezone() -> Tz {
    chrono_tz::Africa::Johannesburg
}

impl Default for ArchivistConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            limits: LimitConfig::default(),
            topics: TopicConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl ArchivistConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ArchivistResult<Self> {
        debug!("Loading configuration from file");

        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ArchivistError::from(ConfigError::new(ConfigErrorKind::Unreadable(format!(
                    "{}: {}",
                    path.as_ref().display(),
                    e
                ))))
            })?;
        Self::deserialize_validated(config)
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed or validated.
    pub fn from_toml_str(toml: &str) -> ArchivistResult<Self> {
        let config = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .map_err(|e| {
                ArchivistError::from(ConfigError::new(ConfigErrorKind::Unreadable(
                    e.to_string(),
                )))
            })?;
        Self::deserialize_validated(config)
    }

    /// Load configuration with precedence: environment > current dir > home dir > bundled.
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or the merged limits are invalid.
    #[instrument]
    pub fn load() -> ArchivistResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/archivist/archivist.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("archivist").required(false))
            .add_source(
                Environment::with_prefix("ARCHIVIST")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("topics.keywords"),
            );

        let config = builder.build().map_err(|e| {
            ArchivistError::from(ConfigError::new(ConfigErrorKind::Unreadable(e.to_string())))
        })?;
        Self::deserialize_validated(config)
    }

    fn deserialize_validated(config: Config) -> ArchivistResult<Self> {
        let parsed: Self = config.try_deserialize().map_err(|e| {
            ArchivistError::from(ConfigError::new(ConfigErrorKind::Malformed(e.to_string())))
        })?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Checks the limits and topic keywords.
    ///
    /// # Errors
    ///
    /// Returns an error if the limits are unusable or a keyword is blank.
    pub fn validate(&self) -> ArchivistResult<()> {
        self.limits.validate()?;
        if self.topics.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(
                ConfigError::invalid("topics.keywords", "must not contain blank entries").into(),
            );
        }
        Ok(())
    }

    /// Directory for the filesystem store.
    ///
    /// Falls back to the platform data directory when no path is configured.
    pub fn storage_path(&self) -> Option<PathBuf> {
        self.storage
            .path
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("archivist")))
    }
}
