//! Assistant configuration parsed from environment variables.

use serde::Serialize;

use super::types::AssistantError;

pub const DEFAULT_MODEL: &str = "llama3";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_TOP_P: f64 = 0.9;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Which wire contract the answering endpoint speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssistantMode {
    /// `{"query"}` in, `{"answer"}` out.
    #[default]
    Query,
    /// Model-serving `generate` endpoint: `{"model","prompt",...}` in, `{"response","done"}` out.
    Generate,
}

/// Sampling options sent in `generate` mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerateOptions {
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self { temperature: DEFAULT_TEMPERATURE, top_p: DEFAULT_TOP_P, max_tokens: DEFAULT_MAX_TOKENS }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssistantTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for AssistantTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssistantConfig {
    /// Endpoint URL; `None` means no external service is configured.
    pub api_url: Option<String>,
    pub mode: AssistantMode,
    pub model: String,
    pub options: GenerateOptions,
    pub timeouts: AssistantTimeouts,
}

impl AssistantConfig {
    /// Build typed assistant config from the process environment.
    ///
    /// # Errors
    ///
    /// See [`AssistantConfig::from_lookup`].
    pub fn from_env() -> Result<Self, AssistantError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed assistant config from a key lookup.
    ///
    /// Optional:
    /// - `ASSISTANT_API_URL`: answering endpoint (blank counts as unset)
    /// - `ASSISTANT_API_MODE`: `query` (default) or `generate`
    /// - `ASSISTANT_MODEL`: model name for `generate`, default `llama3`
    /// - `ASSISTANT_TEMPERATURE`, `ASSISTANT_TOP_P`, `ASSISTANT_MAX_TOKENS`
    /// - `ASSISTANT_REQUEST_TIMEOUT_SECS`: default 120
    /// - `ASSISTANT_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::ConfigParse`] for an unknown mode or a
    /// numeric value that does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AssistantError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("ASSISTANT_API_URL")
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty());
        let mode = parse_mode(lookup("ASSISTANT_API_MODE").as_deref())?;
        let model = lookup("ASSISTANT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_owned());

        let options = GenerateOptions {
            temperature: parse_or(&lookup, "ASSISTANT_TEMPERATURE", DEFAULT_TEMPERATURE)?,
            top_p: parse_or(&lookup, "ASSISTANT_TOP_P", DEFAULT_TOP_P)?,
            max_tokens: parse_or(&lookup, "ASSISTANT_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
        };
        let timeouts = AssistantTimeouts {
            request_secs: parse_or(&lookup, "ASSISTANT_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: parse_or(&lookup, "ASSISTANT_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };

        Ok(Self { api_url, mode, model, options, timeouts })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AssistantError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| AssistantError::ConfigParse(format!("invalid {key}: {raw}"))),
    }
}

fn parse_mode(raw: Option<&str>) -> Result<AssistantMode, AssistantError> {
    match raw.unwrap_or("query") {
        "query" => Ok(AssistantMode::Query),
        "generate" => Ok(AssistantMode::Generate),
        other => Err(AssistantError::ConfigParse(format!(
            "unsupported ASSISTANT_API_MODE '{other}' (expected 'query' or 'generate')"
        ))),
    }
}
