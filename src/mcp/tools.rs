//! Tool registry for MCP tools.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use super::handlers::SearchPhotosHandler;
use crate::models::{Color, OrderBy, Orientation, DEFAULT_PAGE, DEFAULT_PER_PAGE, MAX_PER_PAGE};
use crate::unsplash::PhotoSearch;

/// Name of the photo search tool
pub const SEARCH_PHOTOS_TOOL: &str = "search_photos";

/// An MCP tool that can be called by the client
#[derive(Clone)]
pub struct Tool {
    /// Tool name (e.g., "search_photos")
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON Schema for input parameters
    pub input_schema: serde_json::Value,

    /// Handler function to execute the tool
    pub handler: Arc<dyn ToolHandler>,
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .finish()
    }
}

/// Handler for executing a tool
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync + std::fmt::Debug {
    /// Execute the tool with the given arguments
    async fn execute(&self, args: Value) -> Result<Value, String>;
}

/// Registry for all MCP tools
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Tool>,
}

impl ToolRegistry {
    /// Create a registry holding the photo search tool backed by `search`
    pub fn new(search: Arc<dyn PhotoSearch>) -> Self {
        let mut registry = Self {
            tools: HashMap::new(),
        };
        registry.register(search_photos_tool(search));
        registry
    }

    /// Register a tool
    pub fn register(&mut self, tool: Tool) {
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Get all tools
    pub fn all(&self) -> Vec<&Tool> {
        self.tools.values().collect()
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, args: Value) -> Result<Value, String> {
        let tool = self
            .get(name)
            .ok_or_else(|| format!("Tool '{}' not found", name))?;

        tool.handler.execute(args).await
    }
}

fn search_photos_tool(search: Arc<dyn PhotoSearch>) -> Tool {
    Tool {
        name: SEARCH_PHOTOS_TOOL.to_string(),
        description: "Search for Unsplash photos".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search keyword"
                },
                "page": {
                    "type": "integer",
                    "description": format!("Page number (1-based). Default: {}", DEFAULT_PAGE),
                    "minimum": 1,
                    "default": DEFAULT_PAGE
                },
                "per_page": {
                    "type": "integer",
                    "description": format!(
                        "Results per page (1-{}). Default: {}",
                        MAX_PER_PAGE, DEFAULT_PER_PAGE
                    ),
                    "minimum": 1,
                    "maximum": MAX_PER_PAGE,
                    "default": DEFAULT_PER_PAGE
                },
                "order_by": {
                    "type": "string",
                    "description": "Sort method (relevant or latest). Default: relevant",
                    "enum": OrderBy::names(),
                    "default": OrderBy::default().as_str()
                },
                "color": {
                    "type": "string",
                    "description": format!("Color filter ({})", Color::names().join(", ")),
                    "enum": Color::names()
                },
                "orientation": {
                    "type": "string",
                    "description": format!(
                        "Orientation filter ({})",
                        Orientation::names().join(", ")
                    ),
                    "enum": Orientation::names()
                }
            },
            "required": ["query"]
        }),
        handler: Arc::new(SearchPhotosHandler::new(search)),
    }
}
