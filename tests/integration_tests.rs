//! Integration tests for Unsplash MCP
//!
//! These run the search client against a local mock of the Unsplash API and
//! drive the REST and MCP adapters end to end.

use chrono::{TimeZone, Utc};
use mockito::{Matcher, Server};
use std::sync::Arc;
use std::time::Duration;
use unsplash_mcp::mcp::{McpServer, ToolRegistry, SEARCH_PHOTOS_TOOL};
use unsplash_mcp::rest::{self, HealthResponse, RestState};
use unsplash_mcp::unsplash::{Credentials, FixedClock, MockPhotoSearch};
use unsplash_mcp::utils::HttpClient;
use unsplash_mcp::{PhotoSearch, SearchError, SearchRequest, UnsplashClient};

const TEST_KEY: &str = "test-access-key";

const TWO_PHOTOS: &str = r#"{
    "total": 5,
    "total_pages": 1,
    "results": [
        {
            "id": "abc123",
            "description": "A cat on a windowsill",
            "alt_description": "orange cat",
            "urls": {"regular": "https://images.unsplash.com/abc123?w=1080", "thumb": "https://images.unsplash.com/abc123?w=200"},
            "width": 4000,
            "height": 3000,
            "likes": 12
        },
        {
            "id": "def456",
            "description": null,
            "urls": {"regular": "https://images.unsplash.com/def456?w=1080"},
            "width": 3000,
            "height": 4500
        }
    ]
}"#;

/// Client pointed at `base` with the test key and a short deadline
fn client_for(base: &str, timeout: Duration) -> UnsplashClient {
    let http = HttpClient::new(timeout).unwrap();
    UnsplashClient::new(http, Credentials::new(TEST_KEY))
        .with_api_base(base)
        .unwrap()
        .with_timeout(timeout)
}

/// An address nothing is listening on
async fn closed_port_base() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_search_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/search/photos")
        .match_query(Matcher::Exact(
            "query=cats&page=1&per_page=10&order_by=relevant".to_string(),
        ))
        .match_header("authorization", "Client-ID test-access-key")
        .match_header("accept-version", "v1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(TWO_PHOTOS)
        .create_async()
        .await;

    let client = client_for(&server.url(), Duration::from_secs(5));
    let started = Utc::now();
    let result = client.search(&SearchRequest::new("cats")).await.unwrap();

    mock.assert_async().await;
    assert_eq!(result.query, "cats");
    assert_eq!(result.page, 1);
    assert_eq!(result.per_page, 10);
    assert_eq!(result.total, 5);
    assert_eq!(result.total_pages, 1);
    assert_eq!(result.results.len(), 2);
    assert_eq!(result.results[0].id, "abc123");
    assert_eq!(
        result.results[0].url("thumb"),
        Some("https://images.unsplash.com/abc123?w=200")
    );
    assert!(result.results[1].description.is_none());
    assert!(result.retrieved_at >= started);
}

#[tokio::test]
async fn test_search_normalizes_arguments_and_omits_blank_filters() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/search/photos")
        .match_query(Matcher::Exact(
            "query=sea&page=1&per_page=30&order_by=latest&orientation=landscape".to_string(),
        ))
        .with_status(200)
        .with_body(r#"{"total":0,"total_pages":0,"results":[]}"#)
        .create_async()
        .await;

    let request = SearchRequest::new("  sea ")
        .page(-3)
        .per_page(500)
        .order_by(" LATEST ")
        .color("   ")
        .orientation("Landscape");

    let result = client_for(&server.url(), Duration::from_secs(5))
        .search(&request)
        .await
        .unwrap();

    mock.assert_async().await;
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["order_by"], "latest");
    assert_eq!(json["orientation"], "landscape");
    assert!(json.get("color").is_none());
}

#[tokio::test]
async fn test_fixed_clock_stamps_result() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search/photos")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(TWO_PHOTOS)
        .create_async()
        .await;

    let stamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let client = client_for(&server.url(), Duration::from_secs(5))
        .with_clock(Arc::new(FixedClock(stamp)));

    let result = client.search(&SearchRequest::new("cats")).await.unwrap();
    assert_eq!(result.retrieved_at, stamp);
}

#[tokio::test]
async fn test_upstream_error_preserves_status_and_message() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search/photos")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body("Invalid access token")
        .create_async()
        .await;

    let err = client_for(&server.url(), Duration::from_secs(5))
        .search(&SearchRequest::new("cats"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        SearchError::UpstreamError {
            status: 401,
            message: "Invalid access token".to_string(),
        }
    );
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_long_upstream_message_truncated() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search/photos")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("x".repeat(1000))
        .create_async()
        .await;

    let err = client_for(&server.url(), Duration::from_secs(5))
        .search(&SearchRequest::new("cats"))
        .await
        .unwrap_err();

    match err {
        SearchError::UpstreamError { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, format!("{}...", "x".repeat(512)));
        }
        other => panic!("Expected UpstreamError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search/photos")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let err = client_for(&server.url(), Duration::from_secs(5))
        .search(&SearchRequest::new("cats"))
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::DecodeError(_)));
}

#[tokio::test]
async fn test_sparse_success_body_decodes_to_zero_values() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search/photos")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"total_pages":null,"results":[{"id":"p1","width":null}]}"#)
        .create_async()
        .await;

    let result = client_for(&server.url(), Duration::from_secs(5))
        .search(&SearchRequest::new("cats"))
        .await
        .unwrap();

    assert_eq!(result.total, 0);
    assert_eq!(result.total_pages, 0);
    assert_eq!(result.results.len(), 1);
    assert_eq!(result.results[0].id, "p1");
    assert_eq!(result.results[0].width, 0);
}

#[tokio::test]
async fn test_slow_upstream_is_timeout() {
    // Accepts connections at the OS level but never answers
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let err = client_for(&base, Duration::from_millis(200))
        .search(&SearchRequest::new("cats"))
        .await
        .unwrap_err();

    assert_eq!(err, SearchError::Timeout);
    assert!(err.is_retryable());
    drop(listener);
}

#[tokio::test]
async fn test_closed_port_is_unreachable() {
    let base = closed_port_base().await;

    let err = client_for(&base, Duration::from_secs(5))
        .search(&SearchRequest::new("cats"))
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::UpstreamUnreachable(_)));
}

#[tokio::test]
async fn test_missing_credential_after_validation() {
    let base = closed_port_base().await;
    let client = client_for(&base, Duration::from_secs(5)).with_credentials(Credentials::none());

    let err = client
        .search(&SearchRequest::new("cats"))
        .await
        .unwrap_err();
    assert_eq!(err, SearchError::MissingCredential);

    let err = client
        .search(&SearchRequest::new("cats").color("pink"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        SearchError::InvalidArgument("invalid color value: pink".to_string())
    );

    let err = client
        .search(&SearchRequest::new("cats").order_by("popular"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        SearchError::InvalidArgument("invalid order_by value: popular".to_string())
    );

    let err = client
        .search(&SearchRequest::new("cats").orientation("panoramic"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        SearchError::InvalidArgument("invalid orientation value: panoramic".to_string())
    );

    let err = client.search(&SearchRequest::new("   ")).await.unwrap_err();
    assert_eq!(err, SearchError::InvalidArgument("query is required".to_string()));
}

async fn start_rest(search: Arc<dyn PhotoSearch>) -> String {
    let state = RestState::new(search, "photo-search-test");
    let (addr, _handle) = rest::start("127.0.0.1:0", rest::router(state))
        .await
        .unwrap();
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_rest_health() {
    let base = start_rest(Arc::new(MockPhotoSearch::new())).await;

    let response = reqwest::get(format!("{}/health", base)).await.unwrap();
    assert_eq!(response.status(), 200);
    let health: HealthResponse = response.json().await.unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.service, "photo-search-test");
}

#[tokio::test]
async fn test_health_only_router() {
    let state = RestState::new(Arc::new(MockPhotoSearch::new()), "photo-search-test");
    let (addr, _handle) = rest::start("127.0.0.1:0", rest::health_router(state))
        .await
        .unwrap();
    let base = format!("http://{}", addr);

    let response = reqwest::get(format!("{}/health", base)).await.unwrap();
    assert_eq!(response.status(), 200);
    let health: HealthResponse = response.json().await.unwrap();
    assert_eq!(health.service, "photo-search-test");

    let response = reqwest::get(format!("{}/search?query=cats", base))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_rest_root_usage() {
    let base = start_rest(Arc::new(MockPhotoSearch::new())).await;

    let body = reqwest::get(format!("{}/", base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("/search"));
    assert!(body.contains("/health"));
}

#[tokio::test]
async fn test_rest_search_requires_query() {
    let base = start_rest(Arc::new(MockPhotoSearch::new())).await;

    for url in [format!("{}/search", base), format!("{}/search?query=", base)] {
        let response = reqwest::get(url).await.unwrap();
        assert_eq!(response.status(), 400);
        assert_eq!(response.text().await.unwrap(), "query parameter is required");
    }
}

#[tokio::test]
async fn test_rest_search_success() {
    let mock = Arc::new(MockPhotoSearch::new());
    let base = start_rest(mock.clone()).await;

    let response = reqwest::get(format!(
        "{}/search?query=dogs&page=abc&per_page=5&orientation=squarish&color=",
        base
    ))
    .await
    .unwrap();
    assert_eq!(response.status(), 200);

    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["query"], "dogs");
    assert_eq!(json["page"], 1);
    assert_eq!(json["per_page"], 5);
    assert_eq!(json["orientation"], "squarish");

    let forwarded = mock.last_request().unwrap();
    assert_eq!(forwarded.page, 0);
    assert!(forwarded.color.is_none());
}

#[tokio::test]
async fn test_rest_search_upstream_failure() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search/photos")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("Service Unavailable")
        .create_async()
        .await;

    let client = client_for(&server.url(), Duration::from_secs(5));
    let base = start_rest(Arc::new(client)).await;

    let response = reqwest::get(format!("{}/search?query=cats", base))
        .await
        .unwrap();
    assert_eq!(response.status(), 500);
    let body = response.text().await.unwrap();
    assert!(body.starts_with("Search failed: "));
    assert!(body.contains("503"));
}

#[tokio::test]
async fn test_mcp_server_creation() {
    let server = McpServer::new(Arc::new(MockPhotoSearch::new()));
    assert!(server.is_ok());
}

#[tokio::test]
async fn test_mcp_tool_against_upstream() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/search/photos")
        .match_query(Matcher::Exact(
            "query=cats&page=2&per_page=3&order_by=relevant&color=black_and_white".to_string(),
        ))
        .with_status(200)
        .with_body(TWO_PHOTOS)
        .create_async()
        .await;

    let client = client_for(&server.url(), Duration::from_secs(5));
    let registry = ToolRegistry::new(Arc::new(client));

    let value = registry
        .execute(
            SEARCH_PHOTOS_TOOL,
            serde_json::json!({
                "query": "cats",
                "page": 2,
                "per_page": 3,
                "color": "BLACK_AND_WHITE"
            }),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(value["total"], 5);
    assert_eq!(value["color"], "black_and_white");
    assert_eq!(value["results"][0]["id"], "abc123");
}

#[tokio::test]
async fn test_mcp_tool_reports_upstream_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search/photos")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body("Rate Limit Exceeded")
        .create_async()
        .await;

    let client = client_for(&server.url(), Duration::from_secs(5));
    let registry = ToolRegistry::new(Arc::new(client));

    let err = registry
        .execute(SEARCH_PHOTOS_TOOL, serde_json::json!({"query": "cats"}))
        .await
        .unwrap_err();
    assert_eq!(err, "Unsplash API error (403): Rate Limit Exceeded");
}
