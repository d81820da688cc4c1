//! Configuration handling for the service and the CLI driver.
//!
//! Every setting is read from an environment variable and falls back to a
//! development default. `Config::from_env` validates the numeric settings so a
//! typo in a deployment surfaces at startup instead of as odd batch behaviour.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable names. Public so tests and the CLI can refer to them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_CHARGED_WORDS_DIR: &str = "CHARGED_WORDS_DIR";
pub const ENV_MORPH_DICTIONARY: &str = "MORPH_DICTIONARY";
pub const ENV_ALLOWED_HOSTS: &str = "ALLOWED_HOSTS";
pub const ENV_FETCH_TIMEOUT_MS: &str = "FETCH_TIMEOUT_MS";
pub const ENV_ANALYSIS_TIMEOUT_MS: &str = "ANALYSIS_TIMEOUT_MS";
pub const ENV_MAX_URLS_PER_REQUEST: &str = "MAX_URLS_PER_REQUEST";
pub const ENV_MAX_CONCURRENT_ARTICLES: &str = "MAX_CONCURRENT_ARTICLES";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_CHARGED_WORDS_DIR: &str = "charged_dict";
pub const DEFAULT_ALLOWED_HOSTS: &[&str] = &["inosmi.ru", "dvmn.org"];
const DEFAULT_FETCH_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_ANALYSIS_TIMEOUT_MS: u64 = 3_000;
const DEFAULT_MAX_URLS_PER_REQUEST: usize = 10;
const DEFAULT_MAX_CONCURRENT_ARTICLES: usize = 10;

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    charged_words_dir: PathBuf,
    morph_dictionary: Option<PathBuf>,
    allowed_hosts: Vec<String>,
    fetch_timeout: Duration,
    analysis_timeout: Duration,
    max_urls_per_request: usize,
    max_concurrent_articles: usize,
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let charged_words_dir = env::var(ENV_CHARGED_WORDS_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CHARGED_WORDS_DIR));
        let morph_dictionary = env::var(ENV_MORPH_DICTIONARY)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        let allowed_hosts = match env::var(ENV_ALLOWED_HOSTS) {
            Ok(raw) => parse_hosts(&raw)?,
            Err(_) => DEFAULT_ALLOWED_HOSTS.iter().map(|h| h.to_string()).collect(),
        };

        let fetch_timeout_ms = read_positive(ENV_FETCH_TIMEOUT_MS, DEFAULT_FETCH_TIMEOUT_MS)?;
        let analysis_timeout_ms =
            read_positive(ENV_ANALYSIS_TIMEOUT_MS, DEFAULT_ANALYSIS_TIMEOUT_MS)?;
        let max_urls_per_request =
            read_positive(ENV_MAX_URLS_PER_REQUEST, DEFAULT_MAX_URLS_PER_REQUEST as u64)? as usize;
        let max_concurrent_articles = read_positive(
            ENV_MAX_CONCURRENT_ARTICLES,
            DEFAULT_MAX_CONCURRENT_ARTICLES as u64,
        )? as usize;

        Ok(Self {
            bind_addr,
            charged_words_dir,
            morph_dictionary,
            allowed_hosts,
            fetch_timeout: Duration::from_millis(fetch_timeout_ms),
            analysis_timeout: Duration::from_millis(analysis_timeout_ms),
            max_urls_per_request,
            max_concurrent_articles,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Directory holding the charged-word lists.
    pub fn charged_words_dir(&self) -> &Path {
        &self.charged_words_dir
    }
    /// Optional `form<TAB>lemma` dictionary for the morphological analyzer.
    pub fn morph_dictionary(&self) -> Option<&Path> {
        self.morph_dictionary.as_deref()
    }
    pub fn allowed_hosts(&self) -> &[String] {
        &self.allowed_hosts
    }
    /// Budget for the network retrieval of one article.
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }
    /// Budget for sanitize + normalize + score of one article.
    pub fn analysis_timeout(&self) -> Duration {
        self.analysis_timeout
    }
    pub fn max_urls_per_request(&self) -> usize {
        self.max_urls_per_request
    }
    pub fn max_concurrent_articles(&self) -> usize {
        self.max_concurrent_articles
    }

    pub fn with_bind_addr(mut self, bind_addr: impl Into<String>) -> Self {
        self.bind_addr = bind_addr.into();
        self
    }

    pub fn with_charged_words_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.charged_words_dir = dir.into();
        self
    }

    pub fn with_morph_dictionary(mut self, path: Option<PathBuf>) -> Self {
        self.morph_dictionary = path;
        self
    }

    pub fn with_allowed_hosts(mut self, hosts: Vec<String>) -> Self {
        self.allowed_hosts = hosts;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_analysis_timeout(mut self, timeout: Duration) -> Self {
        self.analysis_timeout = timeout;
        self
    }

    pub fn with_max_urls_per_request(mut self, max: usize) -> Self {
        self.max_urls_per_request = max;
        self
    }

    pub fn with_max_concurrent_articles(mut self, max: usize) -> Self {
        self.max_concurrent_articles = max;
        self
    }
}

impl Default for Config {
    /// Development defaults (mirrors `from_env` with no env overrides).
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            charged_words_dir: PathBuf::from(DEFAULT_CHARGED_WORDS_DIR),
            morph_dictionary: None,
            allowed_hosts: DEFAULT_ALLOWED_HOSTS.iter().map(|h| h.to_string()).collect(),
            fetch_timeout: Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS),
            analysis_timeout: Duration::from_millis(DEFAULT_ANALYSIS_TIMEOUT_MS),
            max_urls_per_request: DEFAULT_MAX_URLS_PER_REQUEST,
            max_concurrent_articles: DEFAULT_MAX_CONCURRENT_ARTICLES,
        }
    }
}

fn read_positive(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(key) {
        Ok(raw) => {
            let value: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: key,
                reason: format!("expected a positive integer, got {:?}", raw),
            })?;
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: key,
                    reason: "must be greater than zero".to_string(),
                });
            }
            Ok(value)
        }
        Err(_) => Ok(default),
    }
}

/// Split a comma-separated host list, dropping blanks. An empty list is an error
/// since every URL would then be rejected.
pub fn parse_hosts(raw: &str) -> Result<Vec<String>, ConfigError> {
    let hosts: Vec<String> = raw
        .split(',')
        .map(|h| h.trim().to_lowercase())
        .filter(|h| !h.is_empty())
        .collect();
    if hosts.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: ENV_ALLOWED_HOSTS,
            reason: "at least one host is required".to_string(),
        });
    }
    Ok(hosts)
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
