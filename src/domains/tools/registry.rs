//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use super::context::ToolContext;
#[cfg(feature = "http")]
use super::error::ToolError;
use super::tool::DbTool;

use super::definitions::{
    CreateIncidentTool, GetTableRowsTool, ListDatabasesTool, ListTablesTool, SearchIncidentsTool,
    SearchKbTool, UpdateIncidentTool,
};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    context: Arc<ToolContext>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(context: Arc<ToolContext>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &Arc<ToolContext> {
        &self.context
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            ListDatabasesTool::NAME,
            ListTablesTool::NAME,
            GetTableRowsTool::NAME,
            CreateIncidentTool::NAME,
            UpdateIncidentTool::NAME,
            SearchIncidentsTool::NAME,
            SearchKbTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            ListDatabasesTool::to_tool(),
            ListTablesTool::to_tool(),
            GetTableRowsTool::to_tool(),
            CreateIncidentTool::to_tool(),
            UpdateIncidentTool::to_tool(),
            SearchIncidentsTool::to_tool(),
            SearchKbTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let ctx = self.context.clone();
        match name {
            ListDatabasesTool::NAME => ListDatabasesTool::http_handler(arguments, ctx).await,
            ListTablesTool::NAME => ListTablesTool::http_handler(arguments, ctx).await,
            GetTableRowsTool::NAME => GetTableRowsTool::http_handler(arguments, ctx).await,
            CreateIncidentTool::NAME => CreateIncidentTool::http_handler(arguments, ctx).await,
            UpdateIncidentTool::NAME => UpdateIncidentTool::http_handler(arguments, ctx).await,
            SearchIncidentsTool::NAME => SearchIncidentsTool::http_handler(arguments, ctx).await,
            SearchKbTool::NAME => SearchKbTool::http_handler(arguments, ctx).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}
