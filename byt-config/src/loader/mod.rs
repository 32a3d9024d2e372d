//! Layered configuration loading.
//!
//! Layers, later ones win: built-in defaults, the TOML file, `.env`, the
//! process environment, and finally command-line overrides. `.env` entries
//! never shadow variables that are already set in the real environment.

pub mod error;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use crate::models::{AdminConfig, ConfigOverrides};
use error::ConfigLoadError;

/// File picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "byt-admin.toml";

pub const ENV_BASE_URL: &str = "BYT_API_BASE_URL";
pub const ENV_TIMEOUT: &str = "BYT_API_TIMEOUT";
pub const ENV_ACCEPT_INVALID_CERTS: &str = "BYT_API_ACCEPT_INVALID_CERTS";
pub const ENV_OPERATOR_NAME: &str = "BYT_OPERATOR_NAME";
pub const ENV_OPERATOR_ROLE: &str = "BYT_OPERATOR_ROLE";
pub const ENV_CART_ITEMS: &str = "BYT_CART_ITEMS";
pub const ENV_LOG: &str = "BYT_LOG";
pub const ENV_LOG_FILE: &str = "BYT_LOG_FILE";

const ENV_KEYS: [&str; 8] = [
    ENV_BASE_URL,
    ENV_TIMEOUT,
    ENV_ACCEPT_INVALID_CERTS,
    ENV_OPERATOR_NAME,
    ENV_OPERATOR_ROLE,
    ENV_CART_ITEMS,
    ENV_LOG,
    ENV_LOG_FILE,
];

/// A layer that contributed at least one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Defaults,
    File,
    EnvFile,
    Environment,
    Overrides,
}

/// Result of a load: the merged config plus provenance.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: AdminConfig,
    pub sources: Vec<ConfigSource>,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    search_default_file: bool,
    env_file: Option<PathBuf>,
    env: Option<HashMap<String, String>>,
    overrides: ConfigOverrides,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            file: None,
            search_default_file: true,
            env_file: None,
            env: None,
            overrides: ConfigOverrides::default(),
        }
    }

    /// Explicit config file. Unlike the default file it must exist.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Skip looking for `byt-admin.toml` in the working directory.
    pub fn without_default_file(mut self) -> Self {
        self.search_default_file = false;
        self
    }

    /// Read a dotenv file as an extra, lower-priority environment layer.
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    /// Use this map instead of the process environment.
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = Some(env);
        self
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let mut config = AdminConfig::default();
        let mut sources = vec![ConfigSource::Defaults];

        let file = self.resolve_file();
        if let Some(path) = file.as_deref() {
            let raw = read_file(path)?;
            apply_file(&mut config, raw)?;
            info!("Loaded configuration file {}", path.display());
            sources.push(ConfigSource::File);
        }

        let from_dotenv = match self.env_file.as_deref() {
            Some(path) => read_env_file(path)?,
            None => HashMap::new(),
        };
        let process_env = self.env_snapshot();

        let dotenv_only: HashMap<&str, &str> = ENV_KEYS
            .iter()
            .filter(|key| !process_env.contains_key(**key))
            .filter_map(|key| from_dotenv.get(*key).map(|v| (*key, v.as_str())))
            .collect();
        if !dotenv_only.is_empty() {
            apply_env(&mut config, |key| dotenv_only.get(key).copied())?;
            sources.push(ConfigSource::EnvFile);
        }

        if ENV_KEYS.iter().any(|key| process_env.contains_key(*key)) {
            apply_env(&mut config, |key| process_env.get(key).map(String::as_str))?;
            sources.push(ConfigSource::Environment);
        }

        if self.overrides != ConfigOverrides::default() {
            apply_overrides(&mut config, &self.overrides)?;
            sources.push(ConfigSource::Overrides);
        }

        debug!("Configuration sources: {:?}", sources);

        Ok(ConfigLoad {
            config,
            sources,
            file,
        })
    }

    fn resolve_file(&self) -> Option<PathBuf> {
        if let Some(path) = &self.file {
            return Some(path.clone());
        }
        if self.search_default_file {
            let candidate = PathBuf::from(DEFAULT_CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    }

    fn env_snapshot(&self) -> HashMap<String, String> {
        match &self.env {
            Some(env) => env
                .iter()
                .filter(|(k, _)| ENV_KEYS.iter().any(|key| *key == k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            None => ENV_KEYS
                .iter()
                .filter_map(|key| std::env::var(key).ok().map(|v| (key.to_string(), v)))
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api: Option<FileApi>,
    operator: Option<FileOperator>,
    cart: Option<FileCart>,
    logging: Option<FileLogging>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileApi {
    base_url: Option<String>,
    timeout: Option<String>,
    accept_invalid_certs: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileOperator {
    name: Option<String>,
    role: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileCart {
    items: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileLogging {
    filter: Option<String>,
    file: Option<PathBuf>,
}

fn read_file(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        std::fs::read_to_string(path).map_err(|source| ConfigLoadError::FileIo {
            path: path.to_path_buf(),
            source,
        })?;
    toml::from_str(&contents).map_err(|source| ConfigLoadError::FileParse {
        path: path.to_path_buf(),
        source,
    })
}

fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigLoadError> {
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    let mut entries = HashMap::new();
    for item in dotenvy::from_path_iter(path)? {
        let (key, value) = item?;
        entries.insert(key, value);
    }
    Ok(entries)
}

fn apply_file(config: &mut AdminConfig, raw: FileConfig) -> Result<(), ConfigLoadError> {
    if let Some(api) = raw.api {
        if let Some(url) = api.base_url {
            config.api.base_url = parse_base_url("api.base_url", &url)?;
        }
        if let Some(timeout) = api.timeout {
            config.api.timeout = parse_timeout("api.timeout", &timeout)?;
        }
        if let Some(flag) = api.accept_invalid_certs {
            config.api.accept_invalid_certs = flag;
        }
    }
    if let Some(operator) = raw.operator {
        if let Some(name) = operator.name {
            config.operator.name = non_empty("operator.name", &name)?;
        }
        if let Some(role) = operator.role {
            config.operator.role = role;
        }
    }
    if let Some(cart) = raw.cart
        && let Some(items) = cart.items
    {
        config.cart.items = items;
    }
    if let Some(logging) = raw.logging {
        if let Some(filter) = logging.filter {
            config.logging.filter = non_empty("logging.filter", &filter)?;
        }
        if let Some(file) = logging.file {
            config.logging.file = file;
        }
    }
    Ok(())
}

fn apply_env<'a>(
    config: &mut AdminConfig,
    get: impl Fn(&str) -> Option<&'a str>,
) -> Result<(), ConfigLoadError> {
    if let Some(url) = get(ENV_BASE_URL) {
        config.api.base_url = parse_base_url(ENV_BASE_URL, url)?;
    }
    if let Some(timeout) = get(ENV_TIMEOUT) {
        config.api.timeout = parse_timeout(ENV_TIMEOUT, timeout)?;
    }
    if let Some(flag) = get(ENV_ACCEPT_INVALID_CERTS) {
        config.api.accept_invalid_certs = parse_bool(ENV_ACCEPT_INVALID_CERTS, flag)?;
    }
    if let Some(name) = get(ENV_OPERATOR_NAME) {
        config.operator.name = non_empty(ENV_OPERATOR_NAME, name)?;
    }
    if let Some(role) = get(ENV_OPERATOR_ROLE) {
        config.operator.role = parse_number(ENV_OPERATOR_ROLE, role)?;
    }
    if let Some(items) = get(ENV_CART_ITEMS) {
        config.cart.items = parse_number(ENV_CART_ITEMS, items)?;
    }
    if let Some(filter) = get(ENV_LOG) {
        config.logging.filter = non_empty(ENV_LOG, filter)?;
    }
    if let Some(file) = get(ENV_LOG_FILE) {
        config.logging.file = PathBuf::from(non_empty(ENV_LOG_FILE, file)?);
    }
    Ok(())
}

fn apply_overrides(
    config: &mut AdminConfig,
    overrides: &ConfigOverrides,
) -> Result<(), ConfigLoadError> {
    if let Some(url) = &overrides.base_url {
        config.api.base_url = parse_base_url("--base-url", url)?;
    }
    if let Some(name) = &overrides.operator_name {
        config.operator.name = non_empty("--operator", name)?;
    }
    if let Some(role) = overrides.operator_role {
        config.operator.role = role;
    }
    if let Some(filter) = &overrides.log_filter {
        config.logging.filter = non_empty("--log-filter", filter)?;
    }
    Ok(())
}

fn parse_base_url(key: &'static str, value: &str) -> Result<Url, ConfigLoadError> {
    let url = Url::parse(value.trim()).map_err(|source| ConfigLoadError::InvalidUrl {
        key,
        value: value.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigLoadError::UnsupportedScheme {
            key,
            scheme: other.to_string(),
        }),
    }
}

fn parse_timeout(
    key: &'static str,
    value: &str,
) -> Result<std::time::Duration, ConfigLoadError> {
    let duration = humantime::parse_duration(value.trim()).map_err(|source| {
        ConfigLoadError::InvalidDuration {
            key,
            value: value.to_string(),
            source,
        }
    })?;
    if duration.is_zero() {
        return Err(ConfigLoadError::ZeroDuration { key });
    }
    Ok(duration)
}

fn parse_number<T: std::str::FromStr>(
    key: &'static str,
    value: &str,
) -> Result<T, ConfigLoadError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigLoadError::InvalidNumber {
            key,
            value: value.to_string(),
        })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigLoadError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigLoadError::InvalidBool {
            key,
            value: value.to_string(),
        }),
    }
}

fn non_empty(key: &'static str, value: &str) -> Result<String, ConfigLoadError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ConfigLoadError::Empty { key })
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_parsing_accepts_common_spellings() {
        assert!(parse_bool("k", "Yes").unwrap());
        assert!(!parse_bool("k", "off").unwrap());
        assert!(parse_bool("k", "maybe").is_err());
    }

    #[test]
    fn base_url_rejects_non_http_schemes() {
        let err = parse_base_url("k", "ftp://example.com").unwrap_err();
        assert!(matches!(err, ConfigLoadError::UnsupportedScheme { .. }));
    }

    #[test]
    fn blank_log_filter_override_names_its_flag() {
        let mut config = AdminConfig::default();
        let overrides = ConfigOverrides {
            log_filter: Some("  ".into()),
            ..ConfigOverrides::default()
        };
        let err = apply_overrides(&mut config, &overrides).unwrap_err();
        assert_eq!(err.to_string(), "--log-filter must not be empty");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = parse_timeout("k", "0s").unwrap_err();
        assert!(matches!(err, ConfigLoadError::ZeroDuration { .. }));
    }
}
