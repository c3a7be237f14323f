/// Configuration for the course filter server
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_PATH_ENV: &str = "COURSE_FILTER_CONFIG";

/// Errors that can occur while resolving the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid port: {0}")]
    InvalidPort(String),

    #[error("Invalid listen address {0}")]
    InvalidAddress(String),
}

/// Server configuration. Every field has a default, so a config file only
/// needs to name what it changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// CSV the catalog snapshot is loaded from at startup
    pub catalog_path: PathBuf,
    /// Full course spreadsheet used for exports
    pub export_source_path: PathBuf,
    /// Maximum number of courses returned by the listing endpoint
    pub list_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            catalog_path: PathBuf::from("output.csv"),
            export_source_path: PathBuf::from("bigcontent.xlsx"),
            list_limit: 50,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a JSON file.
    ///
    /// # Arguments
    /// * `path` - Path to the JSON config file
    ///
    /// # Returns
    /// * `Ok(AppConfig)` - Parsed config, with defaults for missing fields
    /// * `Err` - If the file can't be read or isn't valid JSON
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolves the configuration from the process environment.
    ///
    /// Starts from defaults, then the file named by `COURSE_FILTER_CONFIG`
    /// if set, then `HOST`, `PORT`, `CATALOG_PATH` and `EXPORT_SOURCE_PATH`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::load_from_file(Path::new(&path))?,
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Applies overrides looked up by variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }

        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }

        if let Some(path) = lookup("CATALOG_PATH") {
            self.catalog_path = PathBuf::from(path);
        }

        if let Some(path) = lookup("EXPORT_SOURCE_PATH") {
            self.export_source_path = PathBuf::from(path);
        }

        Ok(())
    }

    /// The address the server should listen on.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| ConfigError::InvalidAddress(addr.clone()))
    }
}
