//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Dataset reads and chat panel operations share one Axum router. Dataset
//! routes are stateless views over the bundled catalog; chat routes drive
//! panels held in `AppState`.

pub mod chat;
pub mod datasets;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;


/// Full HTTP router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/datasets", get(datasets::list_datasets))
        .route("/api/datasets/{key}/dashboard", get(datasets::dashboard))
        .route("/api/datasets/{key}/blocks", get(datasets::list_blocks))
        .route("/api/datasets/{key}/blocks/{name}", get(datasets::get_block))
        .route("/api/datasets/{key}/districts", get(datasets::districts))
        .route("/api/chat", post(chat::open_panel))
        .route("/api/chat/{id}", get(chat::get_panel).delete(chat::close_panel))
        .route("/api/chat/{id}/messages", post(chat::submit))
        .route("/api/chat/{id}/clear", post(chat::clear_panel))
        .route("/api/chat/{id}/dataset", put(chat::set_dataset))
        .route("/api/chat/{id}/resize", post(chat::resize))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
