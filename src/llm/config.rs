//! Completion endpoint configuration

use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for the upstream completion endpoint, read once at
/// startup. Every field has a permissive default: missing values are not
/// fatal, calls simply fail at request time.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-style API, e.g. `https://api.example.com/v1`
    pub api_base: String,
    /// Bearer credential for the API
    pub api_key: String,
    /// Model used when a request does not name one
    pub default_model: String,
    /// Total request timeout
    pub timeout: Duration,
}

impl LlmConfig {
    /// Read configuration from `LLM_API_BASE`, `LLM_API_KEY`,
    /// `LLM_DEFAULT_MODEL` and `LLM_API_TIMEOUT` (seconds).
    pub fn from_env() -> Self {
        let timeout_secs = std::env::var("LLM_API_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self {
            api_base: std::env::var("LLM_API_BASE").unwrap_or_default(),
            api_key: std::env::var("LLM_API_KEY").unwrap_or_default(),
            default_model: std::env::var("LLM_DEFAULT_MODEL").unwrap_or_default(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            api_key: String::new(),
            default_model: String::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
