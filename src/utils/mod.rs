//! Utility modules shared by the search client and the servers.
//!
//! - [`HttpClient`]: shared reqwest client with a fixed per-request timeout
//! - [`truncate_message`]: shorten upstream error bodies for display
//! - [`validate_api_base`]: check a configured upstream base URL
//!
//! # HTTP Client
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use unsplash_mcp::utils::HttpClient;
//!
//! # fn main() -> Result<(), reqwest::Error> {
//! let http = HttpClient::new(Duration::from_secs(15))?;
//! let shared = http.clone(); // same connection pool
//! # let _ = shared;
//! # Ok(())
//! # }
//! ```

mod http;
mod text;
mod validate;

pub use http::HttpClient;
pub use text::{truncate_message, ELLIPSIS};
pub use validate::{validate_api_base, ValidationError};
