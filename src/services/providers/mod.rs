/// Recommendation provider abstraction
///
/// The ranking algorithms live outside this service. Each model is reached
/// through one of the traits below, so the router only sees ordered item ids
/// and never the model internals.
use crate::{error::ProviderResult, models::OfflineModel};

pub mod offline;
pub mod remote;

pub use offline::OfflineStore;
pub use remote::RemoteProvider;

/// Online model answering `recommend(user_id, n)`
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Returns up to `n` item ids for the user, best first
    ///
    /// The result is passed through untouched: no dedup, no truncation.
    async fn recommend(&self, user_id: i64, n: usize) -> ProviderResult<Vec<i64>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &str;
}

/// Lookup of precomputed recommendations for the batch-trained models
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait OfflineRecommender: Send + Sync {
    async fn recommend(&self, model: OfflineModel, user_id: i64) -> ProviderResult<Vec<i64>>;
}
