//! Service configuration.
//!
//! Read from a TOML file: the path in `INSPECTOR_CONFIG`, else
//! `inspector.toml` in the working directory. A missing file means defaults
//! for everything; a present but invalid file aborts start-up.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_ENV: &str = "INSPECTOR_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "inspector.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Open the local UI in the default browser after start-up.
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,
    /// Request body limit for JSON payloads (inline photos make these large).
    #[serde(default = "default_json_limit_mb")]
    pub json_limit_mb: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    #[serde(default = "default_fonts_dir")]
    pub fonts_dir: PathBuf,
    /// Font families tried in order when generating PDFs.
    #[serde(default = "default_font_families")]
    pub font_families: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_open_browser() -> bool {
    true
}
fn default_json_limit_mb() -> usize {
    25
}
fn default_db_path() -> PathBuf {
    PathBuf::from("inspections.sqlite")
}
fn default_fonts_dir() -> PathBuf {
    PathBuf::from("./fonts")
}
fn default_font_families() -> Vec<String> {
    vec!["Arial".to_string(), "LiberationSans".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            open_browser: default_open_browser(),
            json_limit_mb: default_json_limit_mb(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            fonts_dir: default_fonts_dir(),
            font_families: default_font_families(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Config, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Config::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.server.host, self.server.port)
    }
}
