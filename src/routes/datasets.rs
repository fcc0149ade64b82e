//! Dataset and dashboard routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;

use crate::dataset::{Dataset, DatasetError, DatasetKey, IndicatorRecord};
use crate::metrics::{DashboardView, DistrictBucket, dashboard_view, group_by_district};
use crate::state::AppState;

#[cfg(test)]
#[path = "datasets_test.rs"]
mod datasets_test;

#[derive(Debug, Serialize)]
pub struct DatasetSummary {
    pub key: DatasetKey,
    pub title: &'static str,
    pub description: &'static str,
    pub blocks: usize,
}

pub(crate) fn dataset_error_to_status(err: &DatasetError) -> StatusCode {
    match err {
        DatasetError::UnknownKey(_) => StatusCode::NOT_FOUND,
        DatasetError::Parse { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn lookup<'a>(state: &'a AppState, key: &str) -> Result<&'a Dataset, StatusCode> {
    let key: DatasetKey = key.parse().map_err(|e| dataset_error_to_status(&e))?;
    state.catalog.get(key).ok_or(StatusCode::NOT_FOUND)
}

/// `GET /api/datasets`: list bundled datasets.
pub async fn list_datasets(State(state): State<AppState>) -> Json<Vec<DatasetSummary>> {
    let list = state
        .catalog
        .iter()
        .map(|d| DatasetSummary {
            key: d.key,
            title: d.key.title(),
            description: d.key.description(),
            blocks: d.records.len(),
        })
        .collect();
    Json(list)
}

/// `GET /api/datasets/{key}/dashboard`: cards, gauges and charts.
pub async fn dashboard(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DashboardView>, StatusCode> {
    let dataset = lookup(&state, &key)?;
    Ok(Json(dashboard_view(dataset)))
}

/// `GET /api/datasets/{key}/blocks`: all records in file order.
pub async fn list_blocks(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Vec<IndicatorRecord>>, StatusCode> {
    let dataset = lookup(&state, &key)?;
    Ok(Json(dataset.records.clone()))
}

/// `GET /api/datasets/{key}/blocks/{name}`: first record with that block name.
pub async fn get_block(
    State(state): State<AppState>,
    Path((key, name)): Path<(String, String)>,
) -> Result<Json<IndicatorRecord>, StatusCode> {
    let dataset = lookup(&state, &key)?;
    let record = dataset.find_block(&name).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(record.clone()))
}

/// `GET /api/datasets/{key}/districts`: district means in first-seen order.
pub async fn districts(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Vec<DistrictBucket>>, StatusCode> {
    let dataset = lookup(&state, &key)?;
    Ok(Json(group_by_district(&dataset.records)))
}
