use futures::StreamExt;
use futures::stream;
use tokio_util::sync::CancellationToken;

use crate::config::{EngineConfig, FailurePolicy};
use crate::data_models::{ProductSpec, SearchRequest, SearchResult};
use crate::error::{ConfigError, EngineError, SearchError};
use crate::fallback::Degradation;
use crate::formatter::{ReplyFormatter, truncate};
use crate::replies::{Reply, ReplyBatch};
use crate::search_client::{DocumentSearch, HttpSearchClient};

enum ProductOutcome {
    Reply(Reply),
    /// Nothing to show for this product, e.g. a text reply with zero results kept.
    Skip,
    Degraded(Degradation),
}

/// Runs one search per product and merges the formatted replies in product order.
pub struct Aggregator<S> {
    search: S,
    formatter: ReplyFormatter,
    default_language: String,
    failure_policy: FailurePolicy,
    concurrency: usize,
}

impl Aggregator<HttpSearchClient> {
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(HttpSearchClient::new(config)?, config))
    }
}

impl<S: DocumentSearch> Aggregator<S> {
    pub fn new(search: S, config: &EngineConfig) -> Self {
        Self {
            search,
            formatter: ReplyFormatter::new(config.base_url.clone()),
            default_language: config.default_language.clone(),
            failure_policy: config.failure_policy,
            concurrency: config.concurrency.max(1),
        }
    }

    pub fn search_client(&self) -> &S {
        &self.search
    }

    /// Builds the reply batch for `request`.
    ///
    /// Upstream failures and empty result sets become fallback text replies.
    /// Under [`FailurePolicy::FailFast`] the first of those ends the batch and
    /// no later product is appended; with a concurrency of one, no later
    /// product is queried either.
    #[tracing::instrument(
        skip_all,
        fields(format = %request.reply_format, products = request.products.len())
    )]
    pub async fn aggregate(&self, request: &SearchRequest) -> ReplyBatch {
        let query = request.query();
        let language = request.language_or(&self.default_language);
        let mut batch = ReplyBatch::new();

        // Lookups are lazy: none starts until `buffered` polls it.
        let lookups: Vec<_> = request
            .products
            .iter()
            .map(|product| self.lookup(product, query, language))
            .collect();
        let mut outcomes = stream::iter(lookups).buffered(self.concurrency);

        while let Some((product, outcome)) = outcomes.next().await {
            match self.product_outcome(request, product, outcome) {
                ProductOutcome::Reply(reply) => batch.push(reply),
                ProductOutcome::Skip => {}
                ProductOutcome::Degraded(degradation) => {
                    batch.push(degradation.reply());
                    if self.failure_policy == FailurePolicy::FailFast && degradation.aborts_batch() {
                        log::info!(
                            "abandoning remaining products after {} ({degradation:?})",
                            product.name
                        );
                        break;
                    }
                }
            }
        }

        log::info!("answered {} products with {} replies", request.products.len(), batch.len());
        batch
    }

    /// Like [`Aggregator::aggregate`], but gives up as soon as `cancel` fires.
    /// In-flight upstream calls are dropped and no partial batch is returned.
    pub async fn aggregate_until_cancelled(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<ReplyBatch, EngineError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log::warn!("aggregation cancelled with {} products requested", request.products.len());
                Err(EngineError::Cancelled)
            }
            batch = self.aggregate(request) => Ok(batch),
        }
    }

    async fn lookup<'a>(
        &self,
        product: &'a ProductSpec,
        query: &str,
        language: &str,
    ) -> (&'a ProductSpec, Result<SearchResult, SearchError>) {
        (product, self.search.search(product, query, language).await)
    }

    fn product_outcome(
        &self,
        request: &SearchRequest,
        product: &ProductSpec,
        outcome: Result<SearchResult, SearchError>,
    ) -> ProductOutcome {
        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                log::error!("search for product {} failed: {:#}", product.name, e);
                return ProductOutcome::Degraded(Degradation::from(&e));
            }
        };

        if result.results.is_empty() {
            return ProductOutcome::Degraded(Degradation::EmptyResult {
                query: request.query().to_string(),
            });
        }

        let kept = truncate(&result.results, product.max_results);
        match self.formatter.format(&request.reply_format, kept, product) {
            Some(reply) => ProductOutcome::Reply(reply),
            None => ProductOutcome::Skip,
        }
    }
}
