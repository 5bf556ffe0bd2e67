//! Service configuration.
//!
//! Settings come from an optional TOML file and are then overridden by
//! environment variables:
//!
//! - `TRAFFIC_CONFIG`: path to the TOML file (default: search `traffic.toml`)
//! - `HOST` / `PORT`: bind address (default: 0.0.0.0:5050)
//! - `MODEL_PATH`: classifier artifact (default: `trafik_model.json`)
//! - `SCALER_PATH`: optional scaler artifact
//! - `GEOCODING_API_KEY`: enables network geocoding when set
//! - `GEOCODING_ENDPOINT`: geocoding URL override
//! - `GEOCODING_TIMEOUT_SECS`: per-request timeout (default: 5)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::services::geocoding::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub model: ModelSettings,
    #[serde(default)]
    pub geocoding: GeocodingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    #[serde(default)]
    pub scaler_path: Option<PathBuf>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            scaler_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodingSettings {
    /// Network geocoding is disabled when absent.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeocodingSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GeocodingSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5050
}

fn default_model_path() -> PathBuf {
    PathBuf::from("trafik_model.json")
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// File configuration (if any) with environment overrides applied.
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var("TRAFFIC_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => match Self::default_location() {
                Some(path) => Self::from_file(path)?,
                None => Self::default(),
            },
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    fn default_location() -> Option<PathBuf> {
        ["traffic.toml", "backend/traffic.toml", "../traffic.toml"]
            .into_iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
    }

    /// Apply overrides from a key lookup (normally the process environment).
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value: port,
            })?;
        }
        if let Some(path) = lookup("MODEL_PATH") {
            self.model.model_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("SCALER_PATH") {
            self.model.scaler_path = Some(PathBuf::from(path)).filter(|p| !p.as_os_str().is_empty());
        }
        if let Some(key) = lookup("GEOCODING_API_KEY") {
            self.geocoding.api_key = Some(key).filter(|k| !k.trim().is_empty());
        }
        if let Some(endpoint) = lookup("GEOCODING_ENDPOINT") {
            self.geocoding.endpoint = endpoint;
        }
        if let Some(secs) = lookup("GEOCODING_TIMEOUT_SECS") {
            self.geocoding.timeout_secs = secs
                .parse()
                .ok()
                .filter(|s| *s > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: "GEOCODING_TIMEOUT_SECS",
                    value: secs,
                })?;
        }
        Ok(self)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
