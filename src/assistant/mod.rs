//! Assistant: answers chat questions.
//!
//! DESIGN
//! ======
//! `AssistantClient` dispatches to the query/answer or the model-serving
//! `generate` client based on `ASSISTANT_API_MODE`. Query/answer is the
//! default contract; `generate` is only used when selected explicitly. When
//! no endpoint is configured the server falls back to `InsightsResponder`,
//! which answers from the bundled datasets.

pub mod config;
pub mod generate;
pub mod insights;
pub mod query;
pub mod types;

use std::time::Duration;

use serde::Serialize;

use config::{AssistantConfig, AssistantMode, AssistantTimeouts};
pub use insights::InsightsResponder;
pub use types::{Answer, AnswerService, AssistantError, Question};

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// HTTP client for the external answering endpoint.
pub struct AssistantClient {
    inner: AssistantBackend,
    url: String,
}

enum AssistantBackend {
    Query(query::QueryClient),
    Generate(generate::GenerateClient),
}

impl AssistantClient {
    /// Build a client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::NotConfigured`] without an endpoint URL, or
    /// an error if the HTTP client fails to build.
    pub fn from_config(config: AssistantConfig) -> Result<Self, AssistantError> {
        let url = config.api_url.ok_or(AssistantError::NotConfigured)?;
        let inner = match config.mode {
            AssistantMode::Query => AssistantBackend::Query(query::QueryClient::new(url.clone(), config.timeouts)?),
            AssistantMode::Generate => AssistantBackend::Generate(generate::GenerateClient::new(
                url.clone(),
                config.model,
                config.options,
                config.timeouts,
            )?),
        };
        Ok(Self { inner, url })
    }

    /// Configured endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl AnswerService for AssistantClient {
    fn name(&self) -> &'static str {
        match self.inner {
            AssistantBackend::Query(_) => "query",
            AssistantBackend::Generate(_) => "generate",
        }
    }

    async fn answer(&self, question: &Question) -> Result<Answer, AssistantError> {
        match &self.inner {
            AssistantBackend::Query(c) => c.ask(&question.text).await,
            AssistantBackend::Generate(c) => c.generate(&question.text).await,
        }
    }
}

// =============================================================================
// HTTP HELPERS
// =============================================================================

fn build_http(timeouts: AssistantTimeouts) -> Result<reqwest::Client, AssistantError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeouts.request_secs))
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .build()
        .map_err(|e| AssistantError::HttpClientBuild(e.to_string()))
}

/// POST `body` as JSON and return the response text of a 2xx reply.
async fn post_json<B: Serialize + Sync>(http: &reqwest::Client, url: &str, body: &B) -> Result<String, AssistantError> {
    let response = http
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(|e| AssistantError::ApiRequest(e.to_string()))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| AssistantError::ApiRequest(e.to_string()))?;

    if !status.is_success() {
        return Err(AssistantError::ApiResponse { status: status.as_u16(), body: text });
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::config::GenerateOptions;

    fn config(url: Option<&str>, mode: AssistantMode) -> AssistantConfig {
        AssistantConfig {
            api_url: url.map(str::to_owned),
            mode,
            model: "llama3".into(),
            options: GenerateOptions::default(),
            timeouts: AssistantTimeouts::default(),
        }
    }

    #[test]
    fn missing_url_is_not_configured() {
        let err = AssistantClient::from_config(config(None, AssistantMode::Query))
            .err()
            .unwrap();
        assert!(matches!(err, AssistantError::NotConfigured));
    }

    #[test]
    fn mode_selects_backend() {
        let query = AssistantClient::from_config(config(Some("http://localhost:9000/ask"), AssistantMode::Query)).unwrap();
        assert_eq!(query.name(), "query");
        assert_eq!(query.url(), "http://localhost:9000/ask");

        let generate =
            AssistantClient::from_config(config(Some("http://localhost:11434/api/generate"), AssistantMode::Generate))
                .unwrap();
        assert_eq!(generate.name(), "generate");
    }

    #[test]
    fn retryable_covers_transport_and_server_errors() {
        assert!(AssistantError::ApiRequest("reset".into()).retryable());
        assert!(AssistantError::ApiResponse { status: 429, body: String::new() }.retryable());
        assert!(!AssistantError::ApiResponse { status: 400, body: String::new() }.retryable());
        assert!(!AssistantError::ApiParse("bad".into()).retryable());
    }
}
