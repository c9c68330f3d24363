//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `PLAGCHECK_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_MAX_CANDIDATES, DEFAULT_MIN_FRAGMENT_LEN,
    DEFAULT_PLAGIARISM_THRESHOLD, MAX_CANDIDATES_LIMIT,
};

/// Default GitHub REST endpoint.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
/// Default Tavily search endpoint.
pub const DEFAULT_TAVILY_API_URL: &str = "https://api.tavily.com";
/// Default OpenRouter (OpenAI-compatible) endpoint.
pub const DEFAULT_OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1";
/// Default chat model used for rewrites.
pub const DEFAULT_OPENROUTER_MODEL: &str = "mistralai/mistral-7b-instruct";

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `PLAGCHECK_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Sentence encoder directory (`config.json`, `model.safetensors`, `tokenizer.json`).
    /// Unset means the embedder runs in stub mode.
    pub model_path: Option<PathBuf>,

    /// Verdict threshold on the 0..=100 scale. Default: `50.0`.
    pub threshold: f64,

    /// Minimum candidate fragment length in chars. Default: `20`.
    pub min_fragment_len: usize,

    /// Code-search hits requested per ranking. Default: `5`.
    pub max_candidates: u32,

    /// Timeout for outbound HTTP calls. Default: `15s`.
    pub http_timeout: Duration,

    /// GitHub API base URL.
    pub github_api_url: String,

    /// Tavily API base URL.
    pub tavily_api_url: String,

    /// OpenRouter API base URL.
    pub openrouter_api_url: String,

    /// Chat model used by the rewrite service.
    pub openrouter_model: String,

    /// Fallback GitHub token when a request does not carry one.
    pub github_token: Option<String>,

    /// Fallback Tavily key when a request does not carry one.
    pub tavily_api_key: Option<String>,

    /// Fallback OpenRouter key when a request does not carry one.
    pub openrouter_api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            model_path: None,
            threshold: DEFAULT_PLAGIARISM_THRESHOLD,
            min_fragment_len: DEFAULT_MIN_FRAGMENT_LEN,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            tavily_api_url: DEFAULT_TAVILY_API_URL.to_string(),
            openrouter_api_url: DEFAULT_OPENROUTER_API_URL.to_string(),
            openrouter_model: DEFAULT_OPENROUTER_MODEL.to_string(),
            github_token: None,
            tavily_api_key: None,
            openrouter_api_key: None,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "PLAGCHECK_PORT";
    const ENV_BIND_ADDR: &'static str = "PLAGCHECK_BIND_ADDR";
    const ENV_MODEL_PATH: &'static str = "PLAGCHECK_MODEL_PATH";
    const ENV_THRESHOLD: &'static str = "PLAGCHECK_THRESHOLD";
    const ENV_MIN_FRAGMENT_LEN: &'static str = "PLAGCHECK_MIN_FRAGMENT_LEN";
    const ENV_MAX_CANDIDATES: &'static str = "PLAGCHECK_MAX_CANDIDATES";
    const ENV_HTTP_TIMEOUT_SECS: &'static str = "PLAGCHECK_HTTP_TIMEOUT_SECS";
    const ENV_GITHUB_API_URL: &'static str = "PLAGCHECK_GITHUB_API_URL";
    const ENV_TAVILY_API_URL: &'static str = "PLAGCHECK_TAVILY_API_URL";
    const ENV_OPENROUTER_API_URL: &'static str = "PLAGCHECK_OPENROUTER_API_URL";
    const ENV_OPENROUTER_MODEL: &'static str = "PLAGCHECK_OPENROUTER_MODEL";
    const ENV_GITHUB_TOKEN: &'static str = "PLAGCHECK_GITHUB_TOKEN";
    const ENV_TAVILY_API_KEY: &'static str = "PLAGCHECK_TAVILY_API_KEY";
    const ENV_OPENROUTER_API_KEY: &'static str = "PLAGCHECK_OPENROUTER_API_KEY";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let model_path = Self::parse_optional_string_from_env(Self::ENV_MODEL_PATH).map(PathBuf::from);
        let threshold = Self::parse_threshold_from_env(defaults.threshold)?;
        let min_fragment_len =
            Self::parse_usize_from_env(Self::ENV_MIN_FRAGMENT_LEN, defaults.min_fragment_len);
        let max_candidates =
            Self::parse_u64_from_env(Self::ENV_MAX_CANDIDATES, defaults.max_candidates as u64);
        let max_candidates = u32::try_from(max_candidates).unwrap_or(u32::MAX);
        let http_timeout = Duration::from_secs(Self::parse_u64_from_env(
            Self::ENV_HTTP_TIMEOUT_SECS,
            defaults.http_timeout.as_secs(),
        ));

        Ok(Self {
            port,
            bind_addr,
            model_path,
            threshold,
            min_fragment_len,
            max_candidates,
            http_timeout,
            github_api_url: Self::parse_string_from_env(
                Self::ENV_GITHUB_API_URL,
                defaults.github_api_url,
            ),
            tavily_api_url: Self::parse_string_from_env(
                Self::ENV_TAVILY_API_URL,
                defaults.tavily_api_url,
            ),
            openrouter_api_url: Self::parse_string_from_env(
                Self::ENV_OPENROUTER_API_URL,
                defaults.openrouter_api_url,
            ),
            openrouter_model: Self::parse_string_from_env(
                Self::ENV_OPENROUTER_MODEL,
                defaults.openrouter_model,
            ),
            github_token: Self::parse_optional_string_from_env(Self::ENV_GITHUB_TOKEN),
            tavily_api_key: Self::parse_optional_string_from_env(Self::ENV_TAVILY_API_KEY),
            openrouter_api_key: Self::parse_optional_string_from_env(Self::ENV_OPENROUTER_API_KEY),
        })
    }

    /// Validates ranges and paths (does not load anything).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.threshold) {
            return Err(ConfigError::InvalidThreshold {
                value: self.threshold,
            });
        }

        if self.max_candidates == 0 || self.max_candidates > MAX_CANDIDATES_LIMIT {
            return Err(ConfigError::InvalidMaxCandidates {
                value: self.max_candidates,
                max: MAX_CANDIDATES_LIMIT,
            });
        }

        if self.http_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }

        if let Some(ref path) = self.model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_threshold_from_env(default: f64) -> Result<f64, ConfigError> {
        match env::var(Self::ENV_THRESHOLD) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::ThresholdParseError { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        Self::parse_optional_string_from_env(var_name).unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    fn parse_usize_from_env(var_name: &str, default: usize) -> usize {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}
