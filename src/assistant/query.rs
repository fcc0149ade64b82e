//! Query/answer endpoint client.
//!
//! Thin HTTP wrapper: `POST {"query"}`, read `{"answer"}`. Some deployments
//! name the field `response`; either is accepted. Pure parsing lives in
//! `parse_response` for testability.

use super::config::AssistantTimeouts;
use super::types::{Answer, AssistantError};

pub struct QueryClient {
    http: reqwest::Client,
    url: String,
}

impl QueryClient {
    pub fn new(url: String, timeouts: AssistantTimeouts) -> Result<Self, AssistantError> {
        Ok(Self { http: super::build_http(timeouts)?, url })
    }

    pub async fn ask(&self, query: &str) -> Result<Answer, AssistantError> {
        let text = super::post_json(&self.http, &self.url, &ApiRequest { query }).await?;
        parse_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    query: &'a str,
}

#[derive(serde::Deserialize)]
struct ApiResponse {
    answer: Option<String>,
    response: Option<String>,
    done: Option<bool>,
}

// =============================================================================
// PARSING
// =============================================================================

pub(crate) fn parse_response(json: &str) -> Result<Answer, AssistantError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| AssistantError::ApiParse(e.to_string()))?;
    Ok(Answer::from_field(api.answer.or(api.response), api.done))
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
