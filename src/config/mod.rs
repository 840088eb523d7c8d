//! Configuration handling for the scraper and its HTTP server.
//!
//! Everything is read from environment variables with development defaults.
//! The CLI binaries layer their own flags on top of `Config::from_env`.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use url::Url;

/// Environment variable names. Public so binaries and tests can refer to them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_DATA_DIR: &str = "FISHERMAN_DATA_DIR";
pub const ENV_WIKI_BASE_URL: &str = "WIKI_BASE_URL";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

/// Default development values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_WIKI_BASE_URL: &str = "https://wiki.bloodontheclocktower.com";

/// Categories crawled when a caller does not name any.
pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "Townsfolk",
    "Outsiders",
    "Minions",
    "Demons",
    "Travellers",
    "Fabled",
    "Loric",
];

pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    data_dir: PathBuf,
    wiki_base_url: Url,
    log_json: bool,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(
        bind_addr: impl Into<String>,
        data_dir: impl Into<PathBuf>,
        wiki_base_url: Url,
    ) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            data_dir: data_dir.into(),
            wiki_base_url,
            log_json: false,
        }
    }

    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let data_dir = env::var(ENV_DATA_DIR).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        let wiki_base_url =
            env::var(ENV_WIKI_BASE_URL).unwrap_or_else(|_| DEFAULT_WIKI_BASE_URL.to_string());
        let log_json = env::var(ENV_LOG_FORMAT)
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Ok(Self {
            bind_addr,
            data_dir: PathBuf::from(data_dir),
            wiki_base_url: parse_base_url(&wiki_base_url)?,
            log_json,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Root of the on-disk store.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
    /// Origin of the wiki; the MediaWiki API lives at `<base>/api.php`.
    pub fn wiki_base_url(&self) -> &Url {
        &self.wiki_base_url
    }
    pub fn log_json(&self) -> bool {
        self.log_json
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
        field: ENV_WIKI_BASE_URL,
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            field: ENV_WIKI_BASE_URL,
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(url)
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
