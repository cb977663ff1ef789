use axum::{Router, routing::get};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::aggregator::Aggregator;
use crate::search_client::DocumentSearch;

pub mod handlers;

/// Shared by every handler. The token fires when the server starts shutting
/// down so in-flight aggregations stop waiting on upstream.
pub struct AppState<S> {
    pub engine: Arc<Aggregator<S>>,
    pub shutdown: CancellationToken,
}

impl<S> AppState<S> {
    pub fn new(engine: Aggregator<S>, shutdown: CancellationToken) -> Self {
        Self {
            engine: Arc::new(engine),
            shutdown,
        }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            shutdown: self.shutdown.clone(),
        }
    }
}

pub fn create_router<S>(state: AppState<S>) -> Router
where
    S: DocumentSearch + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/search",
            get(handlers::ok_handler).post(handlers::search_handler::<S>),
        )
        .route("/", get(handlers::ok_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
