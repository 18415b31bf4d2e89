//! Configuration for scraping and storage.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Where and how to scrape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// First tournament year to list (inclusive).
    #[serde(default = "default_min_year")]
    pub min_year: u16,
    /// Year to stop listing at (exclusive).
    #[serde(default = "default_max_year")]
    pub max_year: u16,
    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://basschamps.com".to_string()
}

fn default_min_year() -> u16 {
    2006
}

fn default_max_year() -> u16 {
    2026
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("basschamps-scraper/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            min_year: default_min_year(),
            max_year: default_max_year(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Locations of the links file, staging directory and database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_links_file")]
    pub links_file: PathBuf,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_database")]
    pub database: PathBuf,
}

fn default_links_file() -> PathBuf {
    PathBuf::from("links/basschamps_links.json")
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_database() -> PathBuf {
    PathBuf::from("tournaments.db")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            links_file: default_links_file(),
            data_dir: default_data_dir(),
            database: default_database(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub scrape: ScrapeConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then
    /// `BASSCHAMPS_*` environment variables.
    ///
    /// Without an explicit `path`, an optional `basschamps.toml` in the
    /// working directory is read.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => ::config::File::from(path).required(true),
            None => ::config::File::with_name("basschamps").required(false),
        };
        let config = ::config::Config::builder()
            .add_source(::config::Config::try_from(&AppConfig::default())?)
            .add_source(file)
            // BASSCHAMPS_SCRAPE__TIMEOUT_SECS, BASSCHAMPS_STORAGE__DATABASE, ...
            .add_source(
                ::config::Environment::with_prefix("BASSCHAMPS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.scrape.base_url, "https://basschamps.com");
        assert_eq!(config.scrape.min_year..config.scrape.max_year, 2006..2026);
        assert_eq!(config.scrape.timeout_secs, 10);
        assert_eq!(config.storage.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_load_file_overrides_defaults() {
        let path =
            std::env::temp_dir().join(format!("basschamps-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[scrape]\nmin_year = 2015\ntimeout_secs = 30\n\n[storage]\ndatabase = \"db/bass.db\"\n",
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.scrape.min_year, 2015);
        assert_eq!(config.scrape.max_year, 2026);
        assert_eq!(config.scrape.timeout_secs, 30);
        assert_eq!(config.storage.database, PathBuf::from("db/bass.db"));
        assert_eq!(config.storage.links_file, PathBuf::from("links/basschamps_links.json"));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let path = Path::new("/nonexistent/basschamps.toml");
        assert!(AppConfig::load(Some(path)).is_err());
    }
}
