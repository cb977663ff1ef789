//! Stub documentation search API served from a local port.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::json;

use help_skill::config::EngineConfig;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub params: HashMap<String, String>,
    pub user_agent: Option<String>,
}

#[derive(Clone, Default)]
pub struct Upstream {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl Upstream {
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn queried_products(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|c| c.params.get("product").cloned().unwrap_or_default())
            .collect()
    }
}

/// Products named `broken`, `error`, `empty` and `slow` misbehave in the
/// obvious way; `many` returns eight hits; anything else returns three.
async fn search(
    State(upstream): State<Upstream>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let product = params.get("product").cloned().unwrap_or_default();
    upstream.calls.lock().unwrap().push(RecordedCall {
        params: params.clone(),
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    let hits = match product.as_str() {
        "broken" => return (StatusCode::OK, "<html>maintenance</html>").into_response(),
        "error" => return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            3
        }
        "empty" => 0,
        "many" => 8,
        _ => 3,
    };

    let results: Vec<_> = (0..hits)
        .map(|i| {
            json!({
                "title": format!("{product} topic {i}"),
                "description": format!("About {product} topic {i}"),
                "url": format!("/viewer/{product}/{i}.html"),
                "documentType": "Guide",
                "product": product,
                "version": params.get("version").cloned().unwrap_or_default(),
                "views": "42"
            })
        })
        .collect();

    axum::Json(json!({
        "status": "OK",
        "data": {
            "query": params.get("q").cloned().unwrap_or_default(),
            "maxResults": 20,
            "results": results,
            "productResults": null,
            "products": []
        }
    }))
    .into_response()
}

pub async fn spawn_upstream() -> (SocketAddr, Upstream) {
    let upstream = Upstream::default();
    let app = Router::new()
        .route("/http.svc/search", get(search))
        .with_state(upstream.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, upstream)
}

pub fn engine_config(addr: SocketAddr) -> EngineConfig {
    EngineConfig {
        search_api_url: format!("http://{addr}/http.svc/search"),
        base_url: "https://help.example".to_string(),
        timeout: Duration::from_millis(500),
        ..EngineConfig::default()
    }
}
