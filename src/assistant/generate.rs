//! Model-serving `generate` endpoint client.
//!
//! Sends a single non-streaming completion request and reads the
//! `response` / `done` pair back.

use super::config::{AssistantTimeouts, GenerateOptions};
use super::types::{Answer, AssistantError};

pub struct GenerateClient {
    http: reqwest::Client,
    url: String,
    model: String,
    options: GenerateOptions,
}

impl GenerateClient {
    pub fn new(
        url: String,
        model: String,
        options: GenerateOptions,
        timeouts: AssistantTimeouts,
    ) -> Result<Self, AssistantError> {
        Ok(Self { http: super::build_http(timeouts)?, url, model, options })
    }

    pub async fn generate(&self, prompt: &str) -> Result<Answer, AssistantError> {
        let body = ApiRequest { model: &self.model, prompt, stream: false, options: &self.options };
        let text = super::post_json(&self.http, &self.url, &body).await?;
        parse_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: &'a GenerateOptions,
}

#[derive(serde::Deserialize)]
struct ApiResponse {
    response: Option<String>,
    done: Option<bool>,
}

// =============================================================================
// PARSING
// =============================================================================

pub(crate) fn parse_response(json: &str) -> Result<Answer, AssistantError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| AssistantError::ApiParse(e.to_string()))?;
    Ok(Answer::from_field(api.response, api.done))
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
