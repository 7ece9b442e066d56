use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::get_config_path;
use validation::validate_config;

/// One tracked team's calendar feed.
///
/// Mirrors the query parameters of the federation's calendar page: the
/// competition entity code, the pool within it and the team's index in that
/// pool. The category label is ours and travels onto every stored record.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RosterConfig {
    /// Human-readable category label, e.g. "NATIONALE 2 M"
    pub category: String,
    /// Competition entity code, e.g. "ABCCS" or "LIIDF"
    pub competition_code: String,
    /// Pool code within the competition, e.g. "2MD"
    pub pool: String,
    /// Index of the team within the pool's calendar page
    pub team_index: u32,
}

/// Configuration structure for the application.
/// Handles loading, saving, and managing sync settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Domain hosting the calendar pages. Should include the https:// prefix.
    pub source_domain: String,
    /// Path to the matchup database. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_path: Option<String>,
    /// Path to the log file. If not specified, logs go to the default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for page fetches. Defaults to 30 seconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Accept invalid upstream TLS certificates for this run's client only.
    /// The federation site has a history of certificate lapses.
    #[serde(default)]
    pub accept_invalid_certs: bool,
    /// Team rosters to sync, processed in order.
    #[serde(default)]
    pub rosters: Vec<RosterConfig>,
}

/// Default HTTP timeout in seconds
fn default_http_timeout() -> u64 {
    crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source_domain: crate::constants::DEFAULT_SOURCE_DOMAIN.to_string(),
            db_path: None,
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
            accept_invalid_certs: false,
            rosters: Vec::new(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// Environment variables can override config file values.
    ///
    /// # Environment Variables
    /// - `MATCHUP_SOURCE_DOMAIN` - Override source domain
    /// - `MATCHUP_DB_PATH` - Override database path
    /// - `MATCHUP_LOG_FILE` - Override log file path
    /// - `MATCHUP_HTTP_TIMEOUT` - Override HTTP timeout in seconds
    ///
    /// # Notes
    /// - Config file is stored in the platform-specific config directory
    /// - A missing config file is an error: the sync has nothing to do
    ///   without rosters, and this runs unattended
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        if !Path::new(&config_path).exists() {
            return Err(AppError::config_error(format!(
                "No config file found at {config_path}; create one with a [[rosters]] entry per tracked team"
            )));
        }

        Self::load_from_path(&config_path).await
    }

    /// Loads configuration from a custom file path, applying the same
    /// environment overrides and validation as [`Config::load`].
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let mut config: Config = toml::from_str(&content)?;

        // Override with environment variables if present
        if let Ok(source_domain) = std::env::var(crate::constants::env_vars::SOURCE_DOMAIN) {
            config.source_domain = source_domain;
        }

        if let Ok(db_path) = std::env::var(crate::constants::env_vars::DB_PATH) {
            config.db_path = Some(db_path);
        }

        if let Ok(log_file_path) = std::env::var(crate::constants::env_vars::LOG_FILE) {
            config.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(crate::constants::env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.http_timeout_seconds = timeout;
        }

        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(&self.source_domain, &self.rosters, &self.log_file_path)
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Returns the database path, falling back to the platform default.
    pub fn resolved_db_path(&self) -> String {
        self.db_path
            .clone()
            .unwrap_or_else(paths::get_default_db_path)
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist and ensures the
    /// source domain carries the https:// prefix.
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let source_domain = if !self.source_domain.starts_with("https://") {
            format!(
                "https://{}",
                self.source_domain.trim_start_matches("http://")
            )
        } else {
            self.source_domain.clone()
        };
        let content = toml::to_string_pretty(&Config {
            source_domain,
            ..self.clone()
        })?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_config() -> Config {
        Config {
            rosters: vec![RosterConfig {
                category: "PRENAT F".to_string(),
                competition_code: "LIIDF".to_string(),
                pool: "PFB".to_string(),
                team_index: 6,
            }],
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml").to_string_lossy().to_string();

        let config = sample_config();
        config.save_to_path(&path).await.unwrap();

        let loaded = Config::load_from_path(&path).await.unwrap();
        assert_eq!(loaded.source_domain, config.source_domain);
        assert_eq!(loaded.rosters, config.rosters);
        assert_eq!(loaded.http_timeout_seconds, config.http_timeout_seconds);
        assert!(!loaded.accept_invalid_certs);
    }

    #[tokio::test]
    async fn test_save_adds_https_prefix() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml").to_string_lossy().to_string();

        let config = Config {
            source_domain: "http://www.ffvbbeach.org".to_string(),
            ..sample_config()
        };
        config.save_to_path(&path).await.unwrap();

        let loaded = Config::load_from_path(&path).await.unwrap();
        assert_eq!(loaded.source_domain, "https://www.ffvbbeach.org");
    }

    #[tokio::test]
    async fn test_load_rejects_config_without_rosters() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "source_domain = \"https://www.ffvbbeach.org\"\n")
            .await
            .unwrap();

        let result = Config::load_from_path(&path.to_string_lossy()).await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_load_parses_rosters_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let content = r#"
source_domain = "https://www.ffvbbeach.org"
http_timeout_seconds = 10

[[rosters]]
category = "NATIONALE 2 M"
competition_code = "ABCCS"
pool = "2MD"
team_index = 2

[[rosters]]
category = "REGIONALE M"
competition_code = "LIIDF"
pool = "RMB"
team_index = 9
"#;
        tokio::fs::write(&path, content).await.unwrap();

        let config = Config::load_from_path(&path.to_string_lossy()).await.unwrap();
        assert_eq!(config.rosters.len(), 2);
        assert_eq!(config.rosters[1].pool, "RMB");
        assert_eq!(config.rosters[1].team_index, 9);
        assert_eq!(config.http_timeout_seconds, 10);
    }
}
