use super::*;
use crate::routes::app;
use crate::state::test_helpers;
use axum::body::Body;
use axum::http::Request;
use serde_json::Value;
use tower::ServiceExt;

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let app = app(test_helpers::test_app_state());
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

#[test]
fn dataset_error_to_status_maps_unknown_key() {
    let err = DatasetError::UnknownKey("diabetes".into());
    assert_eq!(dataset_error_to_status(&err), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn lists_both_datasets() {
    let (status, body) = get_json("/api/datasets").await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["key"], "hypertension");
    assert_eq!(list[0]["title"], "Hypertension Management");
    assert_eq!(list[0]["blocks"], 10);
    assert_eq!(list[1]["key"], "low_birth_weight");
}

#[tokio::test]
async fn dashboard_has_four_gauges() {
    let (status, body) = get_json("/api/datasets/hypertension/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["gauges"].as_array().unwrap().len(), 4);
    assert_eq!(body["summary"]["total"], 10);
}

#[tokio::test]
async fn unknown_dataset_is_not_found() {
    let (status, _) = get_json("/api/datasets/diabetes/dashboard").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blocks_keep_file_order() {
    let (status, body) = get_json("/api/datasets/hypertension/blocks").await;
    assert_eq!(status, StatusCode::OK);
    let blocks = body.as_array().unwrap();
    assert_eq!(blocks.len(), 10);
    assert_eq!(blocks[0]["block"], "Angara");
    assert_eq!(blocks[0]["district"], "Ranchi");
}

#[tokio::test]
async fn block_by_name() {
    let (status, body) = get_json("/api/datasets/hypertension/blocks/Bero").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["block"], "Bero");

    let (status, _) = get_json("/api/datasets/hypertension/blocks/Atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn districts_in_first_encounter_order() {
    let (status, body) = get_json("/api/datasets/hypertension/districts").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["district"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Ranchi", "Dumka", "Palamu"]);
    let total: u64 = body.as_array().unwrap().iter().map(|d| d["count"].as_u64().unwrap()).sum();
    assert_eq!(total, 10);
}
