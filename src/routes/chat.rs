//! Chat panel routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::dataset::DatasetKey;
use crate::panel::{ChatMessage, PanelView, PointerEvent, SubmitError};
use crate::services::chat::{self, ChatError};
use crate::state::AppState;

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

#[derive(Debug, Default, Deserialize)]
pub struct OpenPanelBody {
    #[serde(default)]
    pub dataset: Option<DatasetKey>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitBody {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct SetDatasetBody {
    pub dataset: DatasetKey,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

#[derive(Debug, Deserialize)]
pub struct ResizeBody {
    pub event: PointerKind,
    pub viewport_width: Option<f64>,
    pub pointer_x: Option<f64>,
}

impl ResizeBody {
    /// A move without both coordinates is rejected.
    fn into_event(self) -> Option<PointerEvent> {
        match self.event {
            PointerKind::Down => Some(PointerEvent::Down),
            PointerKind::Up => Some(PointerEvent::Up),
            PointerKind::Move => Some(PointerEvent::Move {
                viewport_width: self.viewport_width?,
                pointer_x: self.pointer_x?,
            }),
        }
    }
}

pub(crate) fn chat_error_to_status(err: &ChatError) -> StatusCode {
    match err {
        ChatError::PanelNotFound(_) => StatusCode::NOT_FOUND,
        ChatError::Submit(SubmitError::EmptyInput) => StatusCode::BAD_REQUEST,
        ChatError::Submit(SubmitError::Busy) => StatusCode::CONFLICT,
        ChatError::Cancelled => StatusCode::GONE,
    }
}

fn to_status(err: ChatError) -> StatusCode {
    chat_error_to_status(&err)
}

/// `POST /api/chat`: open a panel.
pub async fn open_panel(
    State(state): State<AppState>,
    body: Option<Json<OpenPanelBody>>,
) -> (StatusCode, Json<PanelView>) {
    let dataset = body.and_then(|Json(b)| b.dataset).unwrap_or_default();
    let view = chat::open_panel(&state, dataset).await;
    (StatusCode::CREATED, Json(view))
}

/// `GET /api/chat/{id}`: panel snapshot.
pub async fn get_panel(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<PanelView>, StatusCode> {
    chat::panel_view(&state, id).await.map(Json).map_err(to_status)
}

/// `DELETE /api/chat/{id}`: close a panel, cancelling any in-flight turn.
pub async fn close_panel(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, StatusCode> {
    chat::close_panel(&state, id).await.map_err(to_status)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/chat/{id}/messages`: ask a question, returns the reply message.
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SubmitBody>,
) -> Result<Json<ChatMessage>, StatusCode> {
    chat::submit(&state, id, &body.content).await.map(Json).map_err(to_status)
}

/// `POST /api/chat/{id}/clear`: reset the log.
pub async fn clear_panel(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<PanelView>, StatusCode> {
    chat::clear_panel(&state, id).await.map(Json).map_err(to_status)
}

/// `PUT /api/chat/{id}/dataset`: switch dataset.
pub async fn set_dataset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SetDatasetBody>,
) -> Result<Json<PanelView>, StatusCode> {
    chat::set_dataset(&state, id, body.dataset).await.map(Json).map_err(to_status)
}

/// `POST /api/chat/{id}/resize`: pointer event on the resize handle.
pub async fn resize(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ResizeBody>,
) -> Result<Json<PanelView>, StatusCode> {
    let event = body.into_event().ok_or(StatusCode::BAD_REQUEST)?;
    chat::resize(&state, id, event).await.map(Json).map_err(to_status)
}
