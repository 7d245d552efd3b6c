use std::{sync::Arc, time::Duration};

use crate::{
    config::Config,
    services::providers::{OfflineRecommender, OfflineStore, RecommendationProvider, RemoteProvider},
};

/// Named providers available to this deployment
///
/// Every slot is optional. An empty slot makes its model names resolve to
/// "model not found", exactly like a name the router has never heard of.
/// Built once at startup and never mutated.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    pub userknn: Option<Arc<dyn RecommendationProvider>>,
    pub als_ann: Option<Arc<dyn RecommendationProvider>>,
    pub lfm_ann: Option<Arc<dyn RecommendationProvider>>,
    pub offline: Option<Arc<dyn OfflineRecommender>>,
}

impl ProviderRegistry {
    /// Registry with no providers; only the synthetic model is served
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_userknn(mut self, provider: Arc<dyn RecommendationProvider>) -> Self {
        self.userknn = Some(provider);
        self
    }

    pub fn with_als_ann(mut self, provider: Arc<dyn RecommendationProvider>) -> Self {
        self.als_ann = Some(provider);
        self
    }

    pub fn with_lfm_ann(mut self, provider: Arc<dyn RecommendationProvider>) -> Self {
        self.lfm_ann = Some(provider);
        self
    }

    pub fn with_offline(mut self, recommender: Arc<dyn OfflineRecommender>) -> Self {
        self.offline = Some(recommender);
        self
    }

    /// Builds the registry from deployment configuration
    ///
    /// Providers without a configured URL or file are left empty.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.provider_timeout_secs);
        let mut registry = Self::empty();

        registry.userknn = remote_provider("userknn", config.userknn_url.as_deref(), timeout)?;
        registry.als_ann = remote_provider("als_ann", config.als_ann_url.as_deref(), timeout)?;
        registry.lfm_ann = remote_provider("lfm_ann", config.lfm_ann_url.as_deref(), timeout)?;

        if let Some(path) = &config.offline_recs_path {
            let store: Arc<dyn OfflineRecommender> = Arc::new(OfflineStore::load(path).await?);
            registry.offline = Some(store);
        } else {
            tracing::info!(provider = "offline", "Provider not configured");
        }

        Ok(registry)
    }
}

fn remote_provider(
    name: &str,
    url: Option<&str>,
    timeout: Duration,
) -> anyhow::Result<Option<Arc<dyn RecommendationProvider>>> {
    let Some(url) = url else {
        tracing::info!(provider = name, "Provider not configured");
        return Ok(None);
    };

    let provider: Arc<dyn RecommendationProvider> =
        Arc::new(RemoteProvider::new(name, url, timeout)?);
    tracing::info!(provider = name, url = %url, "Configured remote provider");
    Ok(Some(provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config(pairs: &[(&str, &str)]) -> Config {
        envy::from_iter(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string()))).unwrap()
    }

    #[test]
    fn test_nothing_configured() {
        let registry =
            tokio_test::block_on(ProviderRegistry::from_config(&config(&[("API_KEY", "t")])))
                .unwrap();
        assert!(registry.userknn.is_none());
        assert!(registry.als_ann.is_none());
        assert!(registry.lfm_ann.is_none());
        assert!(registry.offline.is_none());
    }

    #[tokio::test]
    async fn test_configured_slots() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"models": {"dssm": {"1": [2]}}}"#).unwrap();
        let path = file.path().to_string_lossy().to_string();

        let registry = ProviderRegistry::from_config(&config(&[
            ("API_KEY", "t"),
            ("LFM_ANN_URL", "http://lfm:8000"),
            ("OFFLINE_RECS_PATH", &path),
        ]))
        .await
        .unwrap();

        assert!(registry.userknn.is_none());
        assert!(registry.als_ann.is_none());
        assert_eq!(registry.lfm_ann.as_ref().map(|p| p.name()), Some("lfm_ann"));
        assert!(registry.offline.is_some());
    }

    #[tokio::test]
    async fn test_missing_offline_file_fails_startup() {
        let result = ProviderRegistry::from_config(&config(&[
            ("API_KEY", "t"),
            ("OFFLINE_RECS_PATH", "/nonexistent/offline.json"),
        ]))
        .await;
        assert!(result.is_err());
    }
}
