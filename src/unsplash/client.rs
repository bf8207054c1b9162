//! Unsplash search API client.

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::{Clock, Credentials, PhotoSearch, SearchError, SystemClock};
use crate::config::UnsplashConfig;
use crate::models::{SearchRequest, SearchResult, UnsplashSearchResponse};
use crate::utils::{truncate_message, validate_api_base, HttpClient, ValidationError};

/// Production API base
pub const UNSPLASH_API_BASE: &str = "https://api.unsplash.com";

/// Path of the photo search endpoint, relative to the API base
pub const SEARCH_PHOTOS_PATH: &str = "/search/photos";

/// Default deadline for one search
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Upstream error bodies longer than this are cut and marked with "..."
pub const MAX_ERROR_MESSAGE_CHARS: usize = 512;

const API_VERSION: &str = "v1";

/// Errors building a client from configuration
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("invalid Unsplash API base: {0}")]
    InvalidBase(#[from] ValidationError),

    #[error("failed to create HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Client for `GET /search/photos`.
///
/// Cheap to clone; clones share the HTTP connection pool.
#[derive(Clone)]
pub struct UnsplashClient {
    http: HttpClient,
    endpoint: String,
    credentials: Credentials,
    clock: Arc<dyn Clock>,
    timeout: Duration,
}

impl UnsplashClient {
    /// Client against the production API with the default deadline
    pub fn new(http: HttpClient, credentials: Credentials) -> Self {
        Self {
            http,
            endpoint: format!("{}{}", UNSPLASH_API_BASE, SEARCH_PHOTOS_PATH),
            credentials,
            clock: Arc::new(SystemClock),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Build the shared HTTP client and the search client from configuration
    pub fn from_config(config: &UnsplashConfig) -> Result<Self, BuildError> {
        let timeout = config.timeout();
        let http = HttpClient::new(timeout)?;
        Ok(Self::new(http, config.credentials())
            .with_api_base(&config.api_base)?
            .with_timeout(timeout))
    }

    /// Point the client at a different API base (e.g. a local mock)
    pub fn with_api_base(mut self, api_base: &str) -> Result<Self, ValidationError> {
        let base = validate_api_base(api_base)?;
        self.endpoint = format!("{}{}", base, SEARCH_PHOTOS_PATH);
        Ok(self)
    }

    /// Override the per-call deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the clock used for `retrieved_at`
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the access key
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Full URL of the search endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_configured()
    }

    /// Search photos.
    ///
    /// Arguments are validated before the access key is looked at, so a
    /// malformed request is reported as such even when no key is configured.
    /// The deadline covers sending the request and reading the whole body.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        let search = request.normalize()?;

        let access_key = self
            .credentials
            .access_key()
            .ok_or(SearchError::MissingCredential)?;

        tracing::debug!(
            query = %search.query,
            page = search.page,
            per_page = search.per_page,
            order_by = %search.order_by,
            color = ?search.color,
            orientation = ?search.orientation,
            "Searching Unsplash photos"
        );

        let builder = self
            .http
            .client()
            .get(&self.endpoint)
            .header("Accept-Version", API_VERSION)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .header(AUTHORIZATION, format!("Client-ID {}", access_key))
            .query(&search.query_params());

        let exchange = async {
            let response = builder.send().await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        let (status, body) = match tokio::time::timeout(self.timeout, exchange).await {
            Err(_) => {
                tracing::warn!(timeout = ?self.timeout, "Unsplash request timed out");
                return Err(SearchError::Timeout);
            }
            Ok(Err(e)) => return Err(classify_transport_error(e)),
            Ok(Ok(parts)) => parts,
        };

        if !status.is_success() {
            let message = upstream_message(status, &body);
            tracing::warn!(status = status.as_u16(), %message, "Unsplash API error");
            return Err(SearchError::UpstreamError {
                status: status.as_u16(),
                message,
            });
        }

        let response: UnsplashSearchResponse = serde_json::from_slice(&body)
            .map_err(|e| SearchError::DecodeError(e.to_string()))?;

        let result = SearchResult::new(search, response, self.clock.now());

        tracing::debug!(
            total = result.total,
            returned = result.results.len(),
            "Unsplash search complete"
        );

        Ok(result)
    }
}

#[async_trait]
impl PhotoSearch for UnsplashClient {
    async fn search_photos(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        self.search(request).await
    }
}

impl fmt::Debug for UnsplashClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnsplashClient")
            .field("endpoint", &self.endpoint)
            .field("credentials", &self.credentials)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Timeouts stay timeouts; everything else is "unreachable"
fn classify_transport_error(err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        tracing::warn!(error = %err, "Unsplash request timed out");
        SearchError::Timeout
    } else {
        tracing::warn!(error = %err, "Unsplash request failed");
        SearchError::UpstreamUnreachable(err.to_string())
    }
}

/// Trimmed body, or the status line when the body is blank, capped in length
fn upstream_message(status: StatusCode, body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        truncate_message(&status.to_string(), MAX_ERROR_MESSAGE_CHARS)
    } else {
        truncate_message(text, MAX_ERROR_MESSAGE_CHARS)
    }
}
