use crate::constants::{DEFAULT_BIND_ADDR, DEFAULT_PROXY_URL, GPT4_VISION_MODEL, GPT_API_URL};
use std::env;

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_API_URL: &str = "OPENAI_API_URL";
pub const ENV_MODEL: &str = "VISION_MODEL";
pub const ENV_BIND_ADDR: &str = "VISION_BIND_ADDR";
pub const ENV_PROXY_URL: &str = "VISION_PROXY_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
}

/// Settings for the `serve` side.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub bind_addr: String,
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = non_empty(lookup(ENV_API_KEY)).ok_or(ConfigError::Missing(ENV_API_KEY))?;
        Ok(Self {
            api_key,
            api_url: non_empty(lookup(ENV_API_URL)).unwrap_or_else(|| GPT_API_URL.to_string()),
            model: non_empty(lookup(ENV_MODEL)).unwrap_or_else(|| GPT4_VISION_MODEL.to_string()),
            bind_addr: non_empty(lookup(ENV_BIND_ADDR))
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        })
    }
}

/// Settings for the `chat` and `ask` side.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub proxy_url: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let proxy_url = non_empty(lookup(ENV_PROXY_URL))
            .unwrap_or_else(|| DEFAULT_PROXY_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Self { proxy_url }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
