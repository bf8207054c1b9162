//! Mock photo search for testing purposes.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};

use super::{PhotoSearch, SearchError};
use crate::models::{SearchRequest, SearchResult, UnsplashSearchResponse};

/// A [`PhotoSearch`] that never touches the network.
///
/// By default every valid request yields an empty page. A canned response
/// (success or failure) can be set, and every request is recorded so tests
/// can check what an adapter forwarded.
#[derive(Debug, Default)]
pub struct MockPhotoSearch {
    response: Mutex<Option<Result<SearchResult, SearchError>>>,
    requests: Mutex<Vec<SearchRequest>>,
}

impl MockPhotoSearch {
    /// Create a new mock that answers with empty pages
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every subsequent call with `response`
    pub fn set_response(&self, response: Result<SearchResult, SearchError>) {
        *lock(&self.response) = Some(response);
    }

    /// Go back to answering with empty pages
    pub fn clear_response(&self) {
        *lock(&self.response) = None;
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<SearchRequest> {
        lock(&self.requests).clone()
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<SearchRequest> {
        lock(&self.requests).last().cloned()
    }
}

#[async_trait]
impl PhotoSearch for MockPhotoSearch {
    async fn search_photos(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        lock(&self.requests).push(request.clone());

        if let Some(response) = lock(&self.response).as_ref() {
            return response.clone();
        }

        let search = request.normalize()?;
        Ok(SearchResult::new(
            search,
            UnsplashSearchResponse {
                total: 0,
                total_pages: 0,
                results: Vec::new(),
            },
            Utc::now(),
        ))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
