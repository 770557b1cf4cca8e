//! Configuration file support for trivia.
//!
//! Loads configuration from `trivia.toml` in the working directory, or from
//! an explicit `--config` path.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use trivia_core::{SelectionMode, ServiceConfig, DEFAULT_PAGE_SIZE};
use trivia_db::Database;
use trivia_logging::LogFormat;

/// Application configuration loaded from `trivia.toml`
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct TriviaConfig {
    /// SQLite database file
    pub database: Option<PathBuf>,
    /// Questions per page
    pub page_size: Option<usize>,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub quiz: QuizConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct QuizConfig {
    pub selection: Option<SelectionMode>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<LogFormat>,
}

/// The config file name
pub const CONFIG_FILE_NAME: &str = "trivia.toml";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

impl TriviaConfig {
    /// Load configuration from the working directory.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if file exists and parses successfully
    /// - `Ok(None)` if file does not exist
    /// - `Err(...)` if file exists but fails to parse (hard error)
    pub fn load(working_dir: &Path) -> Result<Option<Self>> {
        let config_path = working_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(None);
        }

        Self::load_file(&config_path).map(Some)
    }

    /// Load configuration from an explicit path. A missing file is an error.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: TriviaConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }

    /// Database path: configured value, else the per-user default.
    pub fn database_path(&self) -> PathBuf {
        self.database.clone().unwrap_or_else(Database::default_path)
    }

    /// Settings for the trivia service. A page size of 0 is rejected.
    pub fn service_config(&self) -> Result<ServiceConfig> {
        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            anyhow::bail!("page_size must be at least 1");
        }

        Ok(ServiceConfig {
            page_size,
            selection: self.quiz.selection.unwrap_or_default(),
        })
    }

    /// `host:port` for the HTTP server.
    pub fn bind_address(&self) -> String {
        format!(
            "{}:{}",
            self.server.host.as_deref().unwrap_or(DEFAULT_HOST),
            self.server.port.unwrap_or(DEFAULT_PORT)
        )
    }

    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging.format.unwrap_or_default()
    }
}
