//! Unsplash photo search.
//!
//! [`PhotoSearch`] is the seam both entry adapters (the MCP tool and the REST
//! fallback) depend on. [`UnsplashClient`] is the real implementation and
//! [`MockPhotoSearch`] a canned one for tests.
//!
//! A search is a single independent request/response cycle: arguments are
//! normalized, the access key is checked, one GET is sent under a fixed
//! deadline and the outcome is mapped to a [`SearchResult`] or a
//! [`SearchError`]. Nothing is cached or retried.

mod client;
mod error;
pub mod mock;

pub use client::{
    BuildError, UnsplashClient, MAX_ERROR_MESSAGE_CHARS, REQUEST_TIMEOUT, SEARCH_PHOTOS_PATH,
    UNSPLASH_API_BASE,
};
pub use error::SearchError;
pub use mock::MockPhotoSearch;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;

use crate::models::{SearchRequest, SearchResult};

/// Environment variable holding the Unsplash access key
pub const ACCESS_KEY_ENV: &str = "UNSPLASH_ACCESS_KEY";

/// Anything that can answer a photo search
#[async_trait]
pub trait PhotoSearch: Send + Sync + fmt::Debug {
    /// Run one search. Safe to retry; never retries internally.
    async fn search_photos(&self, request: &SearchRequest) -> Result<SearchResult, SearchError>;
}

/// Source of the "now" stamped on successful results
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock in UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Unsplash access key.
///
/// Absent and blank keys are the same thing: searches fail with
/// [`SearchError::MissingCredential`] until one is supplied.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    access_key: Option<String>,
}

impl Credentials {
    /// Wrap a key, trimming surrounding whitespace
    pub fn new(access_key: impl Into<String>) -> Self {
        Self::from_option(Some(access_key.into()))
    }

    /// Wrap an optional key; blank becomes absent
    pub fn from_option(access_key: Option<String>) -> Self {
        let access_key = access_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        Self { access_key }
    }

    /// Read [`ACCESS_KEY_ENV`]
    pub fn from_env() -> Self {
        Self::from_option(std::env::var(ACCESS_KEY_ENV).ok())
    }

    /// No key at all
    pub fn none() -> Self {
        Self::default()
    }

    pub fn access_key(&self) -> Option<&str> {
        self.access_key.as_deref()
    }

    pub fn is_configured(&self) -> bool {
        self.access_key.is_some()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field(
                "access_key",
                &self.access_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
