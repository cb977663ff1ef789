pub mod aggregator;
pub mod api;
pub mod config;
pub mod data_models;
pub mod error;
pub mod fallback;
pub mod formatter;
pub mod replies;
pub mod search_client;

pub use aggregator::Aggregator;
pub use config::{Config, EngineConfig, FailurePolicy};
pub use data_models::{ProductSpec, ReplyFormat, ResultItem, SearchRequest, SearchResult};
pub use replies::{Reply, ReplyBatch};
pub use search_client::{DocumentSearch, HttpSearchClient};
