use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const CONFIG_FILE_NAME: &str = "token-deployer.toml";
pub const DEFAULT_EXPLORER_URL: &str = "https://basescan.org";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid explorer url '{value}': {source}")]
    InvalidExplorerUrl {
        value: String,
        source: ExplorerUrlError,
    },
}

#[derive(Debug, Error)]
pub enum ExplorerUrlError {
    #[error(transparent)]
    Parse(#[from] url::ParseError),
    #[error("scheme '{0}' is not http or https")]
    UnsupportedScheme(String),
    #[error("url cannot be used as a base for address links")]
    CannotBeABase,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub explorer_base_url: Url,
    pub log_filter: String,
    pub network_label: String,
    pub testnet_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            explorer_base_url: Url::parse(DEFAULT_EXPLORER_URL)
                .expect("default explorer url should always parse"),
            log_filter: "info".into(),
            network_label: "Base Chain".into(),
            testnet_mode: true,
        }
    }
}

impl Settings {
    /// Accepts only absolute http(s) URLs that address paths can be joined
    /// onto. Leaves the current value in place on rejection.
    pub fn set_explorer_url(&mut self, value: &str) -> Result<(), ConfigError> {
        self.explorer_base_url =
            parse_explorer_url(value.trim()).map_err(|source| ConfigError::InvalidExplorerUrl {
                value: value.to_string(),
                source,
            })?;
        Ok(())
    }
}

fn parse_explorer_url(value: &str) -> Result<Url, ExplorerUrlError> {
    let url = Url::parse(value)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ExplorerUrlError::UnsupportedScheme(url.scheme().to_string()));
    }
    if url.cannot_be_a_base() {
        return Err(ExplorerUrlError::CannotBeABase);
    }
    Ok(url)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    explorer_url: Option<String>,
    log_filter: Option<String>,
    network_label: Option<String>,
    testnet_mode: Option<bool>,
}

/// Defaults, then the first config file found, then `APP__*` environment
/// overrides. An explicit `path` must exist; implicit locations are optional.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut settings = Settings::default();

    let file = match path {
        Some(path) => Some(read_file_settings(path)?),
        None => match default_config_paths().into_iter().find(|p| p.is_file()) {
            Some(found) => Some(read_file_settings(&found)?),
            None => None,
        },
    };
    if let Some(file) = file {
        apply_file_settings(&mut settings, file)?;
    }

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok())?;
    Ok(settings)
}

pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("token-deployer").join("config.toml"));
    }
    paths
}

fn read_file_settings(path: &Path) -> Result<FileSettings, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_file_settings(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_file_settings(raw: &str) -> Result<FileSettings, toml::de::Error> {
    toml::from_str(raw)
}

fn apply_file_settings(settings: &mut Settings, file: FileSettings) -> Result<(), ConfigError> {
    if let Some(v) = file.explorer_url {
        settings.set_explorer_url(&v)?;
    }
    if let Some(v) = file.log_filter {
        settings.log_filter = v;
    }
    if let Some(v) = file.network_label {
        settings.network_label = v;
    }
    if let Some(v) = file.testnet_mode {
        settings.testnet_mode = v;
    }
    Ok(())
}

fn apply_env_overrides(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(v) = lookup("APP__EXPLORER_URL") {
        settings.set_explorer_url(&v)?;
    }
    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
    if let Some(v) = lookup("APP__NETWORK_LABEL") {
        settings.network_label = v;
    }
    if let Some(v) = lookup("APP__TESTNET_MODE") {
        match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => settings.testnet_mode = true,
            "0" | "false" | "no" | "off" => settings.testnet_mode = false,
            other => tracing::warn!(value = other, "ignoring unrecognised APP__TESTNET_MODE"),
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
