//! Chat service: panel lifecycle and question turns.
//!
//! DESIGN
//! ======
//! A turn runs in three steps. The write lock is held to begin the turn on
//! the panel, released while the answering service runs, and taken again to
//! record the reply. The answer future races the panel's cancellation
//! receiver, so closing or clearing the panel abandons the request and its
//! result never reaches any state.
//!
//! If the caller goes away mid-turn (the HTTP client disconnects and axum
//! drops the handler future), a `TurnGuard` abandons the turn so the panel
//! does not stay `Awaiting`.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::dataset::DatasetKey;
use crate::panel::{ChatMessage, ChatPanel, PanelView, PointerEvent, SubmitError};
use crate::state::AppState;

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("panel not found: {0}")]
    PanelNotFound(Uuid),
    #[error(transparent)]
    Submit(#[from] SubmitError),
    #[error("request cancelled")]
    Cancelled,
}

// =============================================================================
// PANEL LIFECYCLE
// =============================================================================

/// Open a new panel and return its initial view.
pub async fn open_panel(state: &AppState, dataset: DatasetKey) -> PanelView {
    let panel_id = Uuid::new_v4();
    let panel = ChatPanel::new(dataset);
    let view = panel.view(panel_id);
    state.panels.write().await.insert(panel_id, panel);
    info!(%panel_id, %dataset, "chat: panel opened");
    view
}

/// Snapshot of an open panel.
///
/// # Errors
///
/// Returns [`ChatError::PanelNotFound`] for an unknown ID.
pub async fn panel_view(state: &AppState, panel_id: Uuid) -> Result<PanelView, ChatError> {
    let panels = state.panels.read().await;
    let panel = panels.get(&panel_id).ok_or(ChatError::PanelNotFound(panel_id))?;
    Ok(panel.view(panel_id))
}

/// Close a panel. Dropping it cancels any in-flight turn.
///
/// # Errors
///
/// Returns [`ChatError::PanelNotFound`] for an unknown ID.
pub async fn close_panel(state: &AppState, panel_id: Uuid) -> Result<(), ChatError> {
    let removed = state.panels.write().await.remove(&panel_id);
    let Some(panel) = removed else {
        return Err(ChatError::PanelNotFound(panel_id));
    };
    info!(%panel_id, awaiting = panel.is_awaiting(), "chat: panel closed");
    Ok(())
}

/// Reset a panel's log to the greeting.
///
/// # Errors
///
/// Returns [`ChatError::PanelNotFound`] for an unknown ID.
pub async fn clear_panel(state: &AppState, panel_id: Uuid) -> Result<PanelView, ChatError> {
    with_panel(state, panel_id, |panel| {
        panel.clear();
        info!(%panel_id, epoch = panel.epoch(), "chat: panel cleared");
    })
    .await
}

/// Switch the dataset later questions are asked against.
///
/// # Errors
///
/// Returns [`ChatError::PanelNotFound`] for an unknown ID.
pub async fn set_dataset(state: &AppState, panel_id: Uuid, dataset: DatasetKey) -> Result<PanelView, ChatError> {
    with_panel(state, panel_id, |panel| panel.set_dataset(dataset)).await
}

/// Feed one pointer event to the panel's resize handle.
///
/// # Errors
///
/// Returns [`ChatError::PanelNotFound`] for an unknown ID.
pub async fn resize(state: &AppState, panel_id: Uuid, event: PointerEvent) -> Result<PanelView, ChatError> {
    with_panel(state, panel_id, |panel| panel.resize.apply(event)).await
}

async fn with_panel<F>(state: &AppState, panel_id: Uuid, f: F) -> Result<PanelView, ChatError>
where
    F: FnOnce(&mut ChatPanel),
{
    let mut panels = state.panels.write().await;
    let panel = panels.get_mut(&panel_id).ok_or(ChatError::PanelNotFound(panel_id))?;
    f(panel);
    Ok(panel.view(panel_id))
}

// =============================================================================
// TURNS
// =============================================================================

/// Ask one question on a panel and return the message appended for it.
///
/// Service failures come back as an error chat message, not an `Err`.
///
/// # Errors
///
/// - [`ChatError::PanelNotFound`] for an unknown ID.
/// - [`ChatError::Submit`] for blank input or a busy panel.
/// - [`ChatError::Cancelled`] when the panel is closed or cleared mid-turn.
pub async fn submit(state: &AppState, panel_id: Uuid, content: &str) -> Result<ChatMessage, ChatError> {
    let mut turn = {
        let mut panels = state.panels.write().await;
        let panel = panels.get_mut(&panel_id).ok_or(ChatError::PanelNotFound(panel_id))?;
        panel.begin_submit(content)?
    };
    let mut guard = TurnGuard::new(&state.panels, panel_id, turn.epoch);

    let question = turn.question();
    info!(
        %panel_id,
        epoch = turn.epoch,
        dataset = %turn.dataset,
        service = state.assistant.name(),
        query_len = question.text.len(),
        "chat: question sent"
    );

    let outcome = tokio::select! {
        _ = &mut turn.cancelled => {
            info!(%panel_id, epoch = turn.epoch, "chat: turn cancelled");
            guard.disarm();
            return Err(ChatError::Cancelled);
        }
        outcome = state.assistant.answer(&question) => outcome,
    };

    if let Err(e) = &outcome {
        warn!(%panel_id, error = %e, retryable = e.retryable(), "chat: answer failed");
    }

    let mut panels = state.panels.write().await;
    // Nothing below awaits, so the turn can no longer be dropped half-done.
    guard.disarm();
    let panel = panels.get_mut(&panel_id).ok_or(ChatError::Cancelled)?;
    let reply = panel.complete(turn.epoch, outcome).ok_or(ChatError::Cancelled)?;
    info!(%panel_id, is_error = reply.is_error, "chat: reply recorded");
    Ok(reply)
}

type PanelMap = Arc<RwLock<HashMap<Uuid, ChatPanel>>>;

/// Abandons an in-flight turn when `submit` is dropped before recording a
/// reply.
struct TurnGuard {
    panels: PanelMap,
    panel_id: Uuid,
    epoch: u64,
    armed: bool,
}

impl TurnGuard {
    fn new(panels: &PanelMap, panel_id: Uuid, epoch: u64) -> Self {
        Self { panels: Arc::clone(panels), panel_id, epoch, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for TurnGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let (panel_id, epoch) = (self.panel_id, self.epoch);

        // Fast path: the lock is usually free.
        if let Ok(mut panels) = self.panels.try_write() {
            abandon_turn(&mut panels, panel_id, epoch);
            return;
        }

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(%panel_id, epoch, "chat: no runtime to abandon turn");
            return;
        };
        let panels = Arc::clone(&self.panels);
        handle.spawn(async move {
            let mut panels = panels.write().await;
            abandon_turn(&mut panels, panel_id, epoch);
        });
    }
}

fn abandon_turn(panels: &mut HashMap<Uuid, ChatPanel>, panel_id: Uuid, epoch: u64) {
    let Some(panel) = panels.get_mut(&panel_id) else {
        return;
    };
    if panel.abandon(epoch).is_some() {
        warn!(%panel_id, epoch, "chat: turn abandoned by caller");
    }
}
