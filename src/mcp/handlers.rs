//! Tool handlers.

use std::sync::Arc;

use serde_json::Value;

use super::tools::ToolHandler;
use crate::models::SearchRequest;
use crate::unsplash::PhotoSearch;

/// Handler for the `search_photos` tool
#[derive(Debug)]
pub struct SearchPhotosHandler {
    pub search: Arc<dyn PhotoSearch>,
}

impl SearchPhotosHandler {
    pub fn new(search: Arc<dyn PhotoSearch>) -> Self {
        Self { search }
    }

    /// Turn raw tool arguments into a request without interpreting the values
    fn parse_args(args: Value) -> Result<SearchRequest, String> {
        match args {
            Value::Null => Ok(SearchRequest::default()),
            Value::Object(_) => serde_json::from_value(args)
                .map_err(|e| format!("invalid arguments: {}", e)),
            _ => Err("invalid arguments: expected an object".to_string()),
        }
    }
}

#[async_trait::async_trait]
impl ToolHandler for SearchPhotosHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let request = Self::parse_args(args)?;

        match self.search.search_photos(&request).await {
            Ok(result) => {
                tracing::info!(
                    query = %result.query,
                    page = result.page,
                    returned = result.results.len(),
                    "search_photos succeeded"
                );
                serde_json::to_value(result).map_err(|e| e.to_string())
            }
            Err(e) => {
                tracing::warn!(error = %e, "search_photos failed");
                Err(e.to_string())
            }
        }
    }
}
