//! Data models for photo search requests and results.

mod photo;
mod search;

pub use photo::{Photo, SearchResult, UnsplashSearchResponse};
pub use search::{
    clamp_per_page, normalize_page, parse_optional, Color, InvalidValue, NormalizedSearch,
    OrderBy, Orientation, SearchRequest, DEFAULT_PAGE, DEFAULT_PER_PAGE, MAX_PER_PAGE,
};
