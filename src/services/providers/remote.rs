/// Model-server backed provider
///
/// Talks to an external serving process that hosts a trained model (KNN or
/// ANN index) and exposes it over HTTP:
///
/// `GET {base_url}/recommend/{user_id}?n={n}` → `{"items": [..]}`
///
/// A 404 from the server means the model has never seen the user.
use std::time::Duration;

use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;

use crate::{
    error::{ProviderError, ProviderResult},
    services::providers::RecommendationProvider,
};

#[derive(Debug, Deserialize)]
struct ModelServerResponse {
    items: Vec<i64>,
}

#[derive(Clone)]
pub struct RemoteProvider {
    name: String,
    http_client: HttpClient,
    base_url: String,
}

impl RemoteProvider {
    /// Creates a provider for the model served at `base_url`
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> ProviderResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            name: name.into(),
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for RemoteProvider {
    #[tracing::instrument(skip(self), fields(provider = %self.name))]
    async fn recommend(&self, user_id: i64, n: usize) -> ProviderResult<Vec<i64>> {
        let url = format!("{}/recommend/{}", self.base_url, user_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("n", n)])
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let body: ModelServerResponse = response.json().await?;
                tracing::debug!(items = body.items.len(), "Model server answered");
                Ok(body.items)
            }
            StatusCode::NOT_FOUND => Err(ProviderError::UnknownUser(user_id)),
            status => {
                let text = response.text().await.unwrap_or_default();
                tracing::warn!(%status, body = %text, "Model server returned an error");
                Err(ProviderError::Upstream(format!(
                    "{} returned {}: {}",
                    self.name, status, text
                )))
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
