//! Photo and search result models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use super::search::{Color, NormalizedSearch, OrderBy, Orientation};

/// A single photo as returned by the Unsplash search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    /// Unsplash photo identifier
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_description: Option<String>,

    /// Size variant (raw, full, regular, small, thumb, ...) to URL
    #[serde(default, deserialize_with = "null_as_default")]
    pub urls: BTreeMap<String, String>,

    /// Width in pixels
    #[serde(default, deserialize_with = "null_as_default")]
    pub width: u32,

    /// Height in pixels
    #[serde(default, deserialize_with = "null_as_default")]
    pub height: u32,
}

impl Photo {
    /// Look up the URL for a size variant such as "regular"
    pub fn url(&self, variant: &str) -> Option<&str> {
        self.urls.get(variant).map(String::as_str)
    }
}

/// Body of a successful `GET /search/photos`.
///
/// Missing or null fields decode to zero values; only a body that is not a
/// JSON object of this shape is a decode error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnsplashSearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_pages: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<Photo>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Structured output of a photo search.
///
/// Echoes the normalized arguments alongside the upstream totals so a caller
/// can tell exactly which page of which query it is looking at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub query: String,
    pub page: u64,
    pub per_page: u32,
    pub order_by: OrderBy,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,

    /// Total number of matching photos
    pub total: u64,

    /// Total number of pages at the requested page size
    pub total_pages: u64,

    /// Photos on this page, in upstream order
    pub results: Vec<Photo>,

    /// When the upstream response was received (UTC)
    pub retrieved_at: DateTime<Utc>,
}

impl SearchResult {
    /// Combine the normalized request with an upstream response
    pub fn new(
        search: NormalizedSearch,
        response: UnsplashSearchResponse,
        retrieved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            query: search.query,
            page: search.page,
            per_page: search.per_page,
            order_by: search.order_by,
            color: search.color,
            orientation: search.orientation,
            total: response.total,
            total_pages: response.total_pages,
            results: response.results,
            retrieved_at,
        }
    }
}
