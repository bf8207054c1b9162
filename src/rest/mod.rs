//! REST fallback endpoint.
//!
//! A plain query-string interface to the same search the MCP tool runs, for
//! clients that do not speak MCP:
//!
//! - `GET /` - usage text
//! - `GET /health` - liveness probe
//! - `GET /search?query=&page=&per_page=&order_by=&color=&orientation=`

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;

use crate::models::SearchRequest;
use crate::unsplash::PhotoSearch;

/// Shared state for the REST handlers
#[derive(Debug, Clone)]
pub struct RestState {
    search: Arc<dyn PhotoSearch>,
    service_name: Arc<str>,
}

impl RestState {
    pub fn new(search: Arc<dyn PhotoSearch>, service_name: impl Into<String>) -> Self {
        Self {
            search,
            service_name: Arc::from(service_name.into()),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// Raw `/search` query parameters
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub order_by: Option<String>,
    pub color: Option<String>,
    pub orientation: Option<String>,
}

impl SearchParams {
    /// Map query-string values onto a search request.
    ///
    /// Returns `None` when `query` is missing or empty. Integers that fail to
    /// parse become 0, which normalization turns into the default; range
    /// checks are left to the search itself.
    pub fn into_request(self) -> Option<SearchRequest> {
        let query = self.query.filter(|q| !q.is_empty())?;

        Some(SearchRequest {
            query,
            page: parse_int(self.page.as_deref()),
            per_page: parse_int(self.per_page.as_deref()),
            order_by: self.order_by,
            color: self.color.filter(|c| !c.is_empty()),
            orientation: self.orientation.filter(|o| !o.is_empty()),
        })
    }
}

fn parse_int(value: Option<&str>) -> i64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

/// Create the router with all routes and request logging
pub fn router(state: RestState) -> Router {
    let routes = Router::new()
        .route("/", get(usage))
        .route("/health", get(health_check))
        .route("/search", get(search));

    with_tracing(routes).with_state(state)
}

/// Router serving only `/health`, used when the search fallback is disabled
pub fn health_router(state: RestState) -> Router {
    let routes = Router::new().route("/health", get(health_check));

    with_tracing(routes).with_state(state)
}

fn with_tracing(routes: Router<RestState>) -> Router<RestState> {
    routes.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Bind `addr` and serve `router` on a background task.
///
/// Returns the bound address (useful with port 0) and the task handle.
pub async fn start(
    addr: &str,
    router: Router,
) -> std::io::Result<(SocketAddr, JoinHandle<std::io::Result<()>>)> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!("REST fallback listening on http://{}", local_addr);

    let handle = tokio::spawn(async move { axum::serve(listener, router).await });
    Ok((local_addr, handle))
}

async fn usage() -> &'static str {
    concat!(
        "Unsplash MCP Server\n",
        "\n",
        "Endpoints:\n",
        "- GET /health - Health check\n",
        "- GET /search?query=cats&page=1&per_page=10 - Search photos\n",
        "  optional: order_by (relevant|latest), color, orientation (landscape|portrait|squarish)\n",
    )
}

/// Health check endpoint
async fn health_check(State(state): State<RestState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: state.service_name.to_string(),
    })
}

/// Search photos from query-string arguments
async fn search(State(state): State<RestState>, Query(params): Query<SearchParams>) -> Response {
    let Some(request) = params.into_request() else {
        return (StatusCode::BAD_REQUEST, "query parameter is required").into_response();
    };

    match state.search.search_photos(&request).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => {
            tracing::error!("Search error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Search failed: {}", e),
            )
                .into_response()
        }
    }
}
