//! # Unsplash MCP
//!
//! A Model Context Protocol (MCP) server that searches photos on Unsplash.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Request/response types and argument normalization
//! - [`unsplash`]: The `search/photos` client behind the [`PhotoSearch`] trait
//! - [`mcp`]: MCP protocol implementation and server
//! - [`rest`]: Plain HTTP fallback (`/search`, `/health`)
//! - [`utils`]: HTTP client and small helpers
//! - [`config`]: Configuration management

pub mod config;
pub mod mcp;
pub mod models;
pub mod rest;
pub mod unsplash;
pub mod utils;

// Re-export commonly used types
pub use models::{Photo, SearchRequest, SearchResult};
pub use unsplash::{PhotoSearch, SearchError, UnsplashClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
