use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::{ProviderRegistry, Recommender};

/// Shared application state
///
/// Everything in here is built at startup and only read afterwards, so
/// handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub recommender: Recommender,
}

impl AppState {
    /// Creates the state from already-constructed config and providers
    pub fn new(config: ServerConfig, registry: ProviderRegistry) -> Self {
        let recommender = Recommender::new(Arc::new(registry), config.k_recs);
        Self {
            config: Arc::new(config),
            recommender,
        }
    }
}
