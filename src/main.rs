mod assistant;
mod dataset;
mod metrics;
mod panel;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use assistant::config::AssistantConfig;
use assistant::{AnswerService, AssistantClient, InsightsResponder};
use dataset::Catalog;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let catalog = Arc::new(Catalog::bundled().expect("bundled datasets failed to parse"));
    for dataset in catalog.iter() {
        tracing::info!(dataset = %dataset.key, blocks = dataset.records.len(), "dataset loaded");
    }

    let config = AssistantConfig::from_env().expect("invalid assistant config");
    let assistant: Arc<dyn AnswerService> = match AssistantClient::from_config(config) {
        Ok(client) => {
            tracing::info!(url = client.url(), mode = client.name(), "assistant endpoint configured");
            Arc::new(client)
        }
        Err(e) => {
            tracing::warn!(error = %e, "assistant endpoint unavailable; answering from local insights");
            Arc::new(InsightsResponder::new(catalog.clone()))
        }
    };

    let state = state::AppState::new(catalog, assistant);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "healthdash listening");
    axum::serve(listener, app).await.expect("server failed");
}
