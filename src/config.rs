//! Configuration file handling for split-ledger.
//!
//! The configuration file is optional. It is looked up at `$HOME/.split-ledger.json` unless a
//! path is given with `--config` or `SPLIT_LEDGER_CONFIG`, and it holds the settings that
//! depend on how a particular group records its expenses.

use crate::engine::{View, DEFAULT_EXCLUDED_CATEGORY, DEFAULT_TOTAL_LABEL};
use crate::import::ImportOptions;
use crate::model::DEFAULT_DATE_FORMAT;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "split-ledger";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = ".split-ledger.json";

/// The `Config` object represents the configuration of the app, either loaded from a file or
/// made of built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    path: Option<PathBuf>,
    config_file: ConfigFile,
}

impl Config {
    /// Loads the configuration from `path`, which must exist.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_file() {
            bail!("The config file is missing '{}'", path.display())
        }
        let config_file = ConfigFile::load(&path).await?;
        Ok(Self {
            path: Some(path),
            config_file,
        })
    }

    /// Loads `explicit` if given. Otherwise loads the default config file when it exists and
    /// falls back to built-in defaults when it does not.
    pub async fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path).await;
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::load(path).await,
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Writes a config file holding the default settings to `path`, refusing to overwrite.
    pub async fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.exists() {
            bail!("A file already exists at '{}'", path.display())
        }
        let config_file = ConfigFile::default();
        config_file.save(&path).await?;
        Ok(Self {
            path: Some(path),
            config_file,
        })
    }

    /// The file this configuration was loaded from, `None` when using defaults.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn excluded_category(&self) -> &str {
        &self.config_file.excluded_category
    }

    pub fn date_format(&self) -> &str {
        &self.config_file.date_format
    }

    pub fn total_label(&self) -> &str {
        &self.config_file.total_label
    }

    pub fn currency(&self) -> Option<&str> {
        self.config_file.currency.as_deref()
    }

    pub fn import_options(&self) -> ImportOptions {
        ImportOptions::new(self.date_format(), self.config_file.currency.clone())
    }

    /// A `View` carrying the configured excluded category and total label.
    pub fn view(&self) -> View {
        View::new()
            .with_excluded_category(self.excluded_category())
            .with_total_label(self.total_label())
    }
}

/// The default location of the config file, `$HOME/.split-ledger.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_JSON))
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "split-ledger",
///   "config_version": 1,
///   "excluded_category": "Payment",
///   "date_format": "%Y-%m-%d",
///   "total_label": "TOTAL",
///   "currency": "USD"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "split-ledger"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Rows in this category are settlements between participants, not expenses
    #[serde(default = "default_excluded_category")]
    excluded_category: String,

    /// A chrono format string for the `Date` column of the export
    #[serde(default = "default_date_format")]
    date_format: String,

    /// The label of the all-categories line
    #[serde(default = "default_total_label")]
    total_label: String,

    /// When set, rows in any other currency are dropped at import
    #[serde(default, skip_serializing_if = "Option::is_none")]
    currency: Option<String>,
}

fn default_excluded_category() -> String {
    DEFAULT_EXCLUDED_CATEGORY.to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_total_label() -> String {
    DEFAULT_TOTAL_LABEL.to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            excluded_category: default_excluded_category(),
            date_format: default_date_format(),
            total_label: default_total_label(),
            currency: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or names another application.
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path).await?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.config_version == CONFIG_VERSION,
            "Unsupported config_version {} in {}",
            config.config_version,
            path.display()
        );
        anyhow::ensure!(
            !config.excluded_category.trim().is_empty(),
            "The excluded_category in {} must not be empty",
            path.display()
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[test]
    fn test_config_file_default() {
        let config = Config::default();
        assert_eq!(config.excluded_category(), "Payment");
        assert_eq!(config.date_format(), "%Y-%m-%d");
        assert_eq!(config.total_label(), "TOTAL");
        assert_eq!(config.currency(), None);
        assert!(config.path().is_none());
    }

    #[tokio::test]
    async fn test_config_create_and_load() {
        let env = TestEnv::new();
        let path = env.path().join("config.json");
        let created = Config::create(&path).await.unwrap();
        let loaded = Config::load(&path).await.unwrap();
        assert_eq!(created.config_file, loaded.config_file);
        assert_eq!(loaded.path(), Some(path.as_path()));

        // refuses to clobber
        assert!(Config::create(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_config_file_load_with_minimal_config() {
        let env = TestEnv::new();
        let path = env.write(
            "config.json",
            r#"{
                "app_name": "split-ledger",
                "config_version": 1,
                "excluded_category": "Settle up",
                "currency": "EUR"
            }"#,
        );
        let config = Config::load(&path).await.unwrap();
        assert_eq!(config.excluded_category(), "Settle up");
        assert_eq!(config.date_format(), DEFAULT_DATE_FORMAT);
        assert_eq!(config.currency(), Some("EUR"));
        assert_eq!(config.view().excluded_category(), "Settle up");
        assert_eq!(config.import_options().currency(), Some("EUR"));
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let env = TestEnv::new();
        let path = env.write(
            "config.json",
            r#"{ "app_name": "other-app", "config_version": 1 }"#,
        );
        let result = Config::load(&path).await;
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[tokio::test]
    async fn test_config_file_load_bad_version() {
        let env = TestEnv::new();
        let path = env.write(
            "config.json",
            r#"{ "app_name": "split-ledger", "config_version": 9 }"#,
        );
        assert!(Config::load(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_resolve_explicit_missing_is_error() {
        let env = TestEnv::new();
        let missing = env.path().join("missing.json");
        assert!(Config::resolve(Some(missing.as_path())).await.is_err());
    }

    #[test]
    fn test_serialization_omits_none_fields() {
        let json = serde_json::to_string(&ConfigFile::default()).unwrap();
        assert!(!json.contains("currency"));
    }
}
