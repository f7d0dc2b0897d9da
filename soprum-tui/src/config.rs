use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

const CONFIG_ENV: &str = "SOPRUM_CONFIG";
const DEFAULT_CONFIG: &str = "soprum.toml";

/// Where property and container data is read from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub(crate) enum SourceConfig {
    /// JSON dataset on disk.
    File { path: PathBuf },
    /// Property-management REST API.
    Http {
        base_url: String,
        #[serde(default)]
        timeout_seconds: Option<u64>,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::File {
            path: PathBuf::from("soprum-data.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub username: String,
    pub log_file: PathBuf,
    pub source: SourceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: "demo".to_owned(),
            log_file: PathBuf::from("soprum.log"),
            source: SourceConfig::default(),
        }
    }
}

impl Config {
    pub(crate) fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }
}

/// Load the configuration named by `SOPRUM_CONFIG`, or `soprum.toml`.
///
/// A missing file yields the defaults.
pub(crate) fn load() -> Result<Config> {
    let path = env::var_os(CONFIG_ENV).map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from);
    load_from(&path)
}

fn load_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Config::parse(&text).with_context(|| format!("in {}", path.display()))
}
