use std::future::Future;

use reqwest::Client;

use crate::config::EngineConfig;
use crate::data_models::{ProductSpec, SearchResult, UpstreamResponse};
use crate::error::{ConfigError, SearchError};

pub const PRODUCTION_STATE: &str = "PRODUCTION";

/// Something that can search one product's documentation.
pub trait DocumentSearch: Send + Sync {
    fn search(
        &self,
        product: &ProductSpec,
        query: &str,
        language: &str,
    ) -> impl Future<Output = Result<SearchResult, SearchError>> + Send;
}

/// Client for the documentation search HTTP API. One GET per call, no retries.
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    client: Client,
    endpoint: String,
}

impl HttpSearchClient {
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            endpoint: config.search_api_url.clone(),
        })
    }
}

impl DocumentSearch for HttpSearchClient {
    async fn search(
        &self,
        product: &ProductSpec,
        query: &str,
        language: &str,
    ) -> Result<SearchResult, SearchError> {
        let params = [
            ("state", PRODUCTION_STATE),
            ("language", language),
            ("product", product.name.as_str()),
            ("q", query),
            ("version", product.version.as_str()),
        ];

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        let decoded: UpstreamResponse = serde_json::from_slice(&body)?;

        log::debug!(
            "upstream returned {} results for product {} ({})",
            decoded.data.results.len(),
            product.name,
            decoded.status
        );

        Ok(decoded.into())
    }
}
