//! Chat panel state machine.
//!
//! DESIGN
//! ======
//! A panel is `Idle` or `Awaiting`. `begin_submit` moves to `Awaiting` and
//! hands out a `PendingTurn` ticket; `complete` moves back to `Idle`. The
//! panel keeps the sending half of a `oneshot` for the in-flight turn, so
//! dropping the panel or clearing it cancels the outbound request. Each
//! ticket carries the panel epoch, which `clear` bumps, and replies for an
//! older epoch are dropped.
//!
//! The message log is append-only between clears.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use uuid::Uuid;

use super::resize::ResizeState;
use crate::assistant::{Answer, AssistantError, Question};
use crate::dataset::DatasetKey;

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

pub const GREETING: &str = "Hello! I'm your healthcare data assistant. Ask me anything about your \
                            hypertension and low birth weight data. Try asking about top performers, \
                            averages, or comparisons between years.";

pub const ERROR_REPLY: &str = "Sorry, I encountered an error processing your request. Please try again.";

// =============================================================================
// MESSAGES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub timestamp_ms: i64,
    #[serde(default)]
    pub is_error: bool,
}

impl ChatMessage {
    fn new(role: Role, content: impl Into<String>, is_error: bool) -> Self {
        Self { role, content: content.into(), timestamp_ms: now_ms(), is_error }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content, false)
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content, false)
    }

    #[must_use]
    pub fn error() -> Self {
        Self::new(Role::Assistant, ERROR_REPLY, true)
    }
}

fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

// =============================================================================
// SUBMIT
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("message is empty")]
    EmptyInput,
    #[error("a request is already in flight")]
    Busy,
}

/// Ticket for one in-flight turn.
#[derive(Debug)]
pub struct PendingTurn {
    pub epoch: u64,
    pub query: String,
    pub dataset: DatasetKey,
    /// Resolves when the panel is cleared or dropped.
    pub cancelled: oneshot::Receiver<()>,
}

impl PendingTurn {
    #[must_use]
    pub fn question(&self) -> Question {
        Question { text: self.query.clone(), dataset: self.dataset }
    }
}

// =============================================================================
// PANEL
// =============================================================================

pub struct ChatPanel {
    messages: Vec<ChatMessage>,
    dataset: DatasetKey,
    epoch: u64,
    in_flight: Option<oneshot::Sender<()>>,
    pub resize: ResizeState,
}

/// Serializable snapshot of a panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelView {
    pub id: Uuid,
    pub dataset: DatasetKey,
    pub awaiting: bool,
    pub width: f64,
    pub dragging: bool,
    pub messages: Vec<ChatMessage>,
}

impl ChatPanel {
    #[must_use]
    pub fn new(dataset: DatasetKey) -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING)],
            dataset,
            epoch: 0,
            in_flight: None,
            resize: ResizeState::default(),
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn dataset(&self) -> DatasetKey {
        self.dataset
    }

    /// Switch the dataset later questions are asked against.
    pub fn set_dataset(&mut self, dataset: DatasetKey) {
        self.dataset = dataset;
    }

    #[must_use]
    pub fn is_awaiting(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Start a turn: append the user message and enter `Awaiting`.
    ///
    /// The logged message and the question sent are the same trimmed text.
    ///
    /// # Errors
    ///
    /// [`SubmitError::EmptyInput`] for blank input and [`SubmitError::Busy`]
    /// while a turn is in flight. Neither changes the panel.
    pub fn begin_submit(&mut self, input: &str) -> Result<PendingTurn, SubmitError> {
        let query = input.trim();
        if query.is_empty() {
            return Err(SubmitError::EmptyInput);
        }
        if self.is_awaiting() {
            return Err(SubmitError::Busy);
        }

        let (tx, rx) = oneshot::channel();
        self.in_flight = Some(tx);
        self.messages.push(ChatMessage::user(query));
        Ok(PendingTurn { epoch: self.epoch, query: query.to_owned(), dataset: self.dataset, cancelled: rx })
    }

    /// Finish the turn started at `turn_epoch`. Returns the appended reply,
    /// or `None` when the turn is stale.
    pub fn complete(&mut self, turn_epoch: u64, outcome: Result<Answer, AssistantError>) -> Option<ChatMessage> {
        let reply = match outcome {
            Ok(answer) => ChatMessage::assistant(answer.text),
            Err(_) => ChatMessage::error(),
        };
        self.finish(turn_epoch, reply)
    }

    /// Give up on the turn started at `turn_epoch` when nobody is left to
    /// wait for its reply. Records the error reply and returns to `Idle`.
    pub fn abandon(&mut self, turn_epoch: u64) -> Option<ChatMessage> {
        self.finish(turn_epoch, ChatMessage::error())
    }

    fn finish(&mut self, turn_epoch: u64, reply: ChatMessage) -> Option<ChatMessage> {
        if turn_epoch != self.epoch || !self.is_awaiting() {
            return None;
        }
        self.in_flight = None;
        self.messages.push(reply.clone());
        Some(reply)
    }

    /// Reset to the greeting. Cancels any in-flight turn.
    pub fn clear(&mut self) {
        self.epoch += 1;
        self.in_flight = None;
        self.messages = vec![ChatMessage::assistant(GREETING)];
    }

    #[must_use]
    pub fn view(&self, id: Uuid) -> PanelView {
        PanelView {
            id,
            dataset: self.dataset,
            awaiting: self.is_awaiting(),
            width: self.resize.width(),
            dragging: self.resize.is_dragging(),
            messages: self.messages.clone(),
        }
    }
}

impl Default for ChatPanel {
    fn default() -> Self {
        Self::new(DatasetKey::default())
    }
}
