//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the bundled dataset catalog, the answering service, and the map
//! of open chat panels. Datasets are immutable after startup, so only the
//! panel map sits behind a lock.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::assistant::AnswerService;
use crate::dataset::Catalog;
use crate::panel::ChatPanel;

/// Shared application state. Clone is required by Axum, so every field is
/// Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub assistant: Arc<dyn AnswerService>,
    /// Open chat panels keyed by panel ID.
    pub panels: Arc<RwLock<HashMap<Uuid, ChatPanel>>>,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, assistant: Arc<dyn AnswerService>) -> Self {
        Self { catalog, assistant, panels: Arc::new(RwLock::new(HashMap::new())) }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use crate::assistant::InsightsResponder;
    use crate::dataset::DatasetKey;

    /// App state over the bundled datasets, answered by the local responder.
    #[must_use]
    pub fn test_app_state() -> AppState {
        let catalog = Arc::new(Catalog::bundled().expect("bundled datasets parse"));
        let assistant = Arc::new(InsightsResponder::new(catalog.clone()));
        AppState::new(catalog, assistant)
    }

    /// App state over the bundled datasets with a custom answering service.
    #[must_use]
    pub fn test_app_state_with_assistant(assistant: Arc<dyn AnswerService>) -> AppState {
        let catalog = Arc::new(Catalog::bundled().expect("bundled datasets parse"));
        AppState::new(catalog, assistant)
    }

    /// Open a panel on the default dataset and return its ID.
    pub async fn seed_panel(state: &AppState) -> Uuid {
        let panel_id = Uuid::new_v4();
        let mut panels = state.panels.write().await;
        panels.insert(panel_id, ChatPanel::new(DatasetKey::default()));
        panel_id
    }
}
