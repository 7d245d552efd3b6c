use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{ModelName, MAX_USER_ID, PROVIDER_RECS},
    services::{providers::RecommendationProvider, ProviderRegistry},
};

/// Resolves a model name against the registry and fetches recommendations
///
/// Dispatch order is fixed: the synthetic model, then `userknn`, `als_ann`,
/// `lfm_ann`, then the offline models. A recognised name whose provider is
/// not configured fails the same way as an unknown name.
#[derive(Clone)]
pub struct Recommender {
    registry: Arc<ProviderRegistry>,
    k_recs: usize,
}

impl Recommender {
    pub fn new(registry: Arc<ProviderRegistry>, k_recs: usize) -> Self {
        Self { registry, k_recs }
    }

    /// Rejects user ids above the accepted bound
    pub fn check_user(user_id: i64) -> AppResult<()> {
        if user_id > MAX_USER_ID {
            return Err(AppError::UserNotFound(user_id.to_string()));
        }
        Ok(())
    }

    /// Returns the ranked items for `user_id` from the model named `model_name`
    ///
    /// Provider output is returned as is; provider failures propagate as
    /// `AppError::Provider`.
    pub async fn recommend(&self, model_name: &str, user_id: i64) -> AppResult<Vec<i64>> {
        let not_found = || AppError::ModelNotFound(model_name.to_string());
        let model: ModelName = model_name.parse().map_err(|_| not_found())?;

        let items: Vec<i64> = match model {
            ModelName::SomeModel => (0..self.k_recs as i64).collect(),
            ModelName::UserKnn => {
                let provider = self.registry.userknn.as_ref().ok_or_else(not_found)?;
                call_provider(provider, user_id).await?
            }
            ModelName::AlsAnn => {
                let provider = self.registry.als_ann.as_ref().ok_or_else(not_found)?;
                call_provider(provider, user_id).await?
            }
            ModelName::LfmAnn => {
                let provider = self.registry.lfm_ann.as_ref().ok_or_else(not_found)?;
                call_provider(provider, user_id).await?
            }
            ModelName::Offline(offline_model) => {
                let offline = self.registry.offline.as_ref().ok_or_else(not_found)?;
                offline.recommend(offline_model, user_id).await?
            }
        };

        Ok(items)
    }
}

async fn call_provider(
    provider: &Arc<dyn RecommendationProvider>,
    user_id: i64,
) -> AppResult<Vec<i64>> {
    tracing::debug!(provider = provider.name(), user_id, "Calling provider");
    Ok(provider.recommend(user_id, PROVIDER_RECS).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::models::OfflineModel;
    use crate::services::providers::{MockOfflineRecommender, MockRecommendationProvider};
    use mockall::predicate::eq;

    fn mock_provider(user_id: i64, items: Vec<i64>) -> Arc<dyn RecommendationProvider> {
        let mut provider = MockRecommendationProvider::new();
        provider
            .expect_recommend()
            .with(eq(user_id), eq(PROVIDER_RECS))
            .times(1)
            .returning(move |_, _| Ok(items.clone()));
        provider.expect_name().return_const("mock".to_string());
        Arc::new(provider)
    }

    fn recommender(registry: ProviderRegistry) -> Recommender {
        Recommender::new(Arc::new(registry), 5)
    }

    #[test]
    fn test_user_bound() {
        assert!(Recommender::check_user(MAX_USER_ID).is_ok());
        assert!(Recommender::check_user(0).is_ok());
        assert!(matches!(
            Recommender::check_user(MAX_USER_ID + 1),
            Err(AppError::UserNotFound(id)) if id == "1000000001"
        ));
    }

    #[tokio::test]
    async fn test_synthetic_model_ignores_providers() {
        let recommender = recommender(ProviderRegistry::empty());
        let items = recommender.recommend("some_model", 123).await.unwrap();
        assert_eq!(items, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_userknn_passes_provider_output_through() {
        let registry = ProviderRegistry::empty().with_userknn(mock_provider(7, vec![3, 3, 1]));
        let items = recommender(registry).recommend("userknn", 7).await.unwrap();
        assert_eq!(items, vec![3, 3, 1]);
    }

    #[tokio::test]
    async fn test_each_ann_slot_is_routed_separately() {
        let registry = ProviderRegistry::empty()
            .with_als_ann(mock_provider(1, vec![10]))
            .with_lfm_ann(mock_provider(1, vec![20]));
        let recommender = recommender(registry);

        assert_eq!(recommender.recommend("als_ann", 1).await.unwrap(), vec![10]);
        assert_eq!(recommender.recommend("lfm_ann", 1).await.unwrap(), vec![20]);
    }

    #[tokio::test]
    async fn test_unconfigured_provider_is_model_not_found() {
        let recommender = recommender(ProviderRegistry::empty());
        for name in ["userknn", "als_ann", "lfm_ann", "dssm", "ranker"] {
            let err = recommender.recommend(name, 1).await.unwrap_err();
            assert!(matches!(err, AppError::ModelNotFound(ref m) if m == name));
        }
    }

    #[tokio::test]
    async fn test_unknown_model() {
        let recommender = recommender(ProviderRegistry::empty());
        let err = recommender.recommend("Some_Model", 1).await.unwrap_err();
        assert_eq!(err.to_string(), "Model Some_Model not found");
    }

    #[tokio::test]
    async fn test_offline_receives_model_name() {
        let mut offline = MockOfflineRecommender::new();
        offline
            .expect_recommend()
            .with(eq(OfflineModel::RecVae), eq(11))
            .times(1)
            .returning(|_, _| Ok(vec![4, 2]));
        let registry = ProviderRegistry::empty().with_offline(Arc::new(offline));

        let items = recommender(registry).recommend("recvae", 11).await.unwrap();
        assert_eq!(items, vec![4, 2]);
    }

    #[tokio::test]
    async fn test_provider_errors_are_not_masked() {
        let mut provider = MockRecommendationProvider::new();
        provider
            .expect_recommend()
            .returning(|user_id, _| Err(ProviderError::UnknownUser(user_id)));
        provider.expect_name().return_const("mock".to_string());
        let registry = ProviderRegistry::empty().with_userknn(Arc::new(provider));

        let err = recommender(registry).recommend("userknn", 9).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Provider(ProviderError::UnknownUser(9))
        ));
    }
}
