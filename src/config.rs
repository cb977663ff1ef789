use std::env;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::data_models::DEFAULT_LANGUAGE;
use crate::error::ConfigError;

pub const DEFAULT_SEARCH_API_URL: &str = "https://help.sap.com/http.svc/search";
pub const DEFAULT_BASE_URL: &str = "https://help.sap.com";
pub const DEFAULT_USER_AGENT: &str = "help-skill";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// What the aggregation does with the products after one has failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Emit the fallback and abandon the remaining products.
    #[default]
    FailFast,
    /// Emit the fallback for the failing product and keep going.
    Isolate,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail-fast" | "fail_fast" | "failfast" => Ok(FailurePolicy::FailFast),
            "isolate" => Ok(FailurePolicy::Isolate),
            other => Err(format!("expected `fail-fast` or `isolate`, got `{other}`")),
        }
    }
}

/// Upstream and aggregation settings handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub search_api_url: String,
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub default_language: String,
    pub failure_policy: FailurePolicy,
    /// Upstream calls allowed in flight at once for a single request.
    pub concurrency: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_api_url: DEFAULT_SEARCH_API_URL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_language: DEFAULT_LANGUAGE.to_string(),
            failure_policy: FailurePolicy::FailFast,
            concurrency: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub engine: EngineConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            engine: EngineConfig::default(),
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the given env file (which must exist), then reads the process environment.
    pub fn from_env_file(path: &Path) -> Result<Self, ConfigError> {
        dotenvy::from_path(path)?;
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = EngineConfig::default();
        let get_or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let engine = EngineConfig {
            search_api_url: get_or_default("HELP_SEARCH_API_URL", defaults.search_api_url.as_str()),
            base_url: get_or_default("HELP_BASE_URL", defaults.base_url.as_str()),
            timeout: Duration::from_secs(parse_env(&lookup, "HELP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?),
            user_agent: get_or_default("HELP_USER_AGENT", defaults.user_agent.as_str()),
            default_language: get_or_default("HELP_DEFAULT_LANGUAGE", defaults.default_language.as_str()),
            failure_policy: parse_env(&lookup, "HELP_FAILURE_POLICY", defaults.failure_policy)?,
            concurrency: parse_env(&lookup, "HELP_CONCURRENCY", defaults.concurrency)?,
        };

        if engine.concurrency == 0 {
            return Err(ConfigError::Invalid {
                key: "HELP_CONCURRENCY",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Config {
            port: parse_env(&lookup, "PORT", DEFAULT_PORT)?,
            engine,
        })
    }
}

fn parse_env<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: ToString,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw,
            reason: e.to_string(),
        }),
    }
}
