//! Assistant types: questions, answers, errors and the service trait.

use serde::{Deserialize, Serialize};

use crate::dataset::DatasetKey;

/// Reply text used when the service answers without the expected field.
pub const FALLBACK_ANSWER: &str = "Sorry, I couldn't find an answer to that.";

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by assistant operations.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// No answering endpoint is configured.
    #[error("assistant endpoint not configured: set ASSISTANT_API_URL")]
    NotConfigured,

    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The HTTP request to the answering service failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The answering service returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The response body was not the JSON object we expect.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl AssistantError {
    /// Whether resending the same question could succeed.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::ApiRequest(_) | Self::ApiResponse { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// QUESTION / ANSWER
// =============================================================================

/// A user turn forwarded to the answering service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    /// Dataset selected in the panel when the question was asked.
    pub dataset: DatasetKey,
}

/// Reply from the answering service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    /// `false` only when the service says more output is pending.
    pub done: bool,
}

impl Answer {
    #[must_use]
    pub fn complete(text: impl Into<String>) -> Self {
        Self { text: text.into(), done: true }
    }

    /// Map an optional answer field to reply text, substituting the fallback.
    #[must_use]
    pub fn from_field(text: Option<String>, done: Option<bool>) -> Self {
        Self { text: text.unwrap_or_else(|| FALLBACK_ANSWER.to_owned()), done: done.unwrap_or(true) }
    }
}

// =============================================================================
// SERVICE TRAIT
// =============================================================================

/// Anything that can answer a chat question. Enables mocking in tests.
#[async_trait::async_trait]
pub trait AnswerService: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &'static str;

    /// Answer one question.
    ///
    /// # Errors
    ///
    /// Returns an [`AssistantError`] on transport failure, a non-success
    /// status, or an unparseable body.
    async fn answer(&self, question: &Question) -> Result<Answer, AssistantError>;
}
