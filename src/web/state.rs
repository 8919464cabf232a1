use std::sync::Arc;

use crate::{Config, model::ModelManager};

/// Shared handles injected into every handler through axum state.
#[derive(Debug, Clone)]
pub struct AppState {
    mm: ModelManager,
    config: Arc<Config>,
}

impl AppState {
    pub fn new(mm: ModelManager, config: Config) -> Self {
        Self {
            mm,
            config: Arc::new(config),
        }
    }

    pub fn pool(&self) -> &ModelManager {
        &self.mm
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
