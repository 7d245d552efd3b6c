/// Precomputed recommendations for the batch-trained models
///
/// The recommendations are produced offline and shipped as one JSON file:
///
/// ```json
/// {
///   "models": { "dssm": { "42": [10, 3, 7] }, "recvae": { ... } },
///   "popular": [1, 2, 3]
/// }
/// ```
///
/// The file is read once at startup; lookups afterwards are plain map reads.
use std::{collections::HashMap, path::Path};

use serde::Deserialize;

use crate::{
    error::{ProviderError, ProviderResult},
    models::OfflineModel,
    services::providers::OfflineRecommender,
};

#[derive(Debug, Default, Deserialize)]
pub struct OfflineStore {
    #[serde(default)]
    models: HashMap<String, HashMap<i64, Vec<i64>>>,
    /// Served to users a model has no precomputed list for
    #[serde(default)]
    popular: Vec<i64>,
}

impl OfflineStore {
    /// Loads the recommendation file from disk
    pub async fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let store: Self = serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;

        for (model, users) in &store.models {
            tracing::info!(model = %model, users = users.len(), "Loaded offline recommendations");
        }
        if store.models.is_empty() {
            tracing::warn!(path = %path.display(), "Offline recommendation file has no models");
        }

        Ok(store)
    }

    fn lookup(&self, model: OfflineModel, user_id: i64) -> ProviderResult<Vec<i64>> {
        let users = self
            .models
            .get(model.as_str())
            .ok_or_else(|| ProviderError::ModelNotLoaded(model.to_string()))?;

        match users.get(&user_id) {
            Some(items) => Ok(items.clone()),
            None if !self.popular.is_empty() => Ok(self.popular.clone()),
            None => Err(ProviderError::UnknownUser(user_id)),
        }
    }
}

#[async_trait::async_trait]
impl OfflineRecommender for OfflineStore {
    async fn recommend(&self, model: OfflineModel, user_id: i64) -> ProviderResult<Vec<i64>> {
        self.lookup(model, user_id)
    }
}
