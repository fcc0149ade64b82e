use super::*;
use crate::panel::chat::GREETING;
use crate::routes::app;
use crate::state::test_helpers;
use axum::body::Body;
use axum::http::Request;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn call(state: &AppState, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app(state.clone()).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

async fn open(state: &AppState) -> String {
    let (status, body) = call(state, "POST", "/api/chat", None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_owned()
}

#[test]
fn chat_error_to_status_maps_variants() {
    assert_eq!(chat_error_to_status(&ChatError::PanelNotFound(Uuid::nil())), StatusCode::NOT_FOUND);
    assert_eq!(chat_error_to_status(&ChatError::Submit(SubmitError::EmptyInput)), StatusCode::BAD_REQUEST);
    assert_eq!(chat_error_to_status(&ChatError::Submit(SubmitError::Busy)), StatusCode::CONFLICT);
    assert_eq!(chat_error_to_status(&ChatError::Cancelled), StatusCode::GONE);
}

#[tokio::test]
async fn open_panel_defaults_to_hypertension() {
    let state = test_helpers::test_app_state();
    let (status, body) = call(&state, "POST", "/api/chat", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["dataset"], "hypertension");
    assert_eq!(body["awaiting"], false);
    assert_eq!(body["width"], 540.0);
    assert_eq!(body["messages"][0]["content"], GREETING);
}

#[tokio::test]
async fn open_panel_with_dataset() {
    let state = test_helpers::test_app_state();
    let (status, body) = call(&state, "POST", "/api/chat", Some(json!({"dataset": "low_birth_weight"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["dataset"], "low_birth_weight");
}

#[tokio::test]
async fn submit_returns_reply_message() {
    let state = test_helpers::test_app_state();
    let id = open(&state).await;

    let (status, body) = call(&state, "POST", &format!("/api/chat/{id}/messages"), Some(json!({"content": "average"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "assistant");
    assert_eq!(body["is_error"], false);

    let (_, view) = call(&state, "GET", &format!("/api/chat/{id}"), None).await;
    assert_eq!(view["messages"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn empty_submit_is_bad_request() {
    let state = test_helpers::test_app_state();
    let id = open(&state).await;
    let (status, _) = call(&state, "POST", &format!("/api/chat/{id}/messages"), Some(json!({"content": "  "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_panel_is_not_found() {
    let state = test_helpers::test_app_state();
    let id = Uuid::new_v4();
    let (status, _) = call(&state, "GET", &format!("/api/chat/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&state, "POST", &format!("/api/chat/{id}/messages"), Some(json!({"content": "hi"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_closes_panel() {
    let state = test_helpers::test_app_state();
    let id = open(&state).await;
    let (status, _) = call(&state, "DELETE", &format!("/api/chat/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&state, "GET", &format!("/api/chat/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn clear_and_switch_dataset() {
    let state = test_helpers::test_app_state();
    let id = open(&state).await;
    call(&state, "POST", &format!("/api/chat/{id}/messages"), Some(json!({"content": "top"}))).await;

    let (status, view) = call(&state, "POST", &format!("/api/chat/{id}/clear"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["messages"].as_array().unwrap().len(), 1);

    let (status, view) = call(&state, "PUT", &format!("/api/chat/{id}/dataset"), Some(json!({"dataset": "low_birth_weight"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["dataset"], "low_birth_weight");
}

#[tokio::test]
async fn resize_drag_clamps_width() {
    let state = test_helpers::test_app_state();
    let id = open(&state).await;
    let uri = format!("/api/chat/{id}/resize");

    call(&state, "POST", &uri, Some(json!({"event": "down"}))).await;
    let (status, view) = call(
        &state,
        "POST",
        &uri,
        Some(json!({"event": "move", "viewport_width": 1440.0, "pointer_x": 1400.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["width"], 400.0);

    let (_, view) = call(&state, "POST", &uri, Some(json!({"event": "up"}))).await;
    assert_eq!(view["dragging"], false);
}

#[tokio::test]
async fn resize_move_without_coordinates_is_bad_request() {
    let state = test_helpers::test_app_state();
    let id = open(&state).await;
    let (status, _) = call(&state, "POST", &format!("/api/chat/{id}/resize"), Some(json!({"event": "move"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
