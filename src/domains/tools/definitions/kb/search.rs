//! Search knowledge base tool definition.

use std::sync::Arc;

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::super::common::{DEFAULT_SEARCH_LIMIT, deserialize_opt_text, json_result, rows_to_json};
use crate::core::database::{Filters, Select};
use crate::domains::tools::{DbTool, ToolContext, ToolError};

/// Columns returned by `search_kb`, in output order.
pub const KB_COLUMNS: &[&str] = &[
    "number",
    "version",
    "short_description",
    "author",
    "category",
    "workflow",
    "updated",
];

/// Parameters for the search KB tool. All filters are optional and combined
/// with AND.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SearchKbParams {
    /// Exact article number.
    #[serde(default)]
    pub number: Option<String>,

    /// Exact version; a string or number.
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    #[schemars(with = "Option<String>")]
    pub version: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    /// Workflow state, e.g. "Published".
    #[serde(default)]
    pub workflow: Option<String>,

    /// Substring of the short description.
    #[serde(default)]
    pub short_description_contains: Option<String>,

    /// Maximum number of articles to return (default: 10).
    #[serde(default)]
    pub limit: Option<u32>,
}

impl SearchKbParams {
    pub fn filters(&self) -> Filters {
        Filters::new()
            .eq("number", self.number.clone())
            .eq("version", self.version.clone())
            .eq("author", self.author.clone())
            .eq("category", self.category.clone())
            .eq("workflow", self.workflow.clone())
            .contains("short_description", self.short_description_contains.clone())
    }
}

/// Search KB tool - most recently updated first.
pub struct SearchKbTool;

impl DbTool for SearchKbTool {
    const NAME: &'static str = "search_kb";

    const DESCRIPTION: &'static str =
        "Search knowledge base articles by number, version, author, category, workflow \
         or a substring of the short description. Results are ordered by last update, \
         newest first (default limit 10).";

    type Params = SearchKbParams;

    #[instrument(skip_all)]
    async fn execute(
        params: SearchKbParams,
        ctx: Arc<ToolContext>,
    ) -> Result<CallToolResult, ToolError> {
        let filters = params.filters();
        debug!("KB filters: {:?}", filters.predicates());

        let mut qb = Select::new(ctx.knowledge_base(), KB_COLUMNS)
            .filters(filters)
            .newest_first_by("updated")
            .limit(params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT))
            .build();

        let mut conn = ctx.database().acquire().await?;
        let rows = qb.build().fetch_all(&mut *conn).await?;

        info!("Found {} KB articles", rows.len());

        json_result("articles", rows_to_json(&rows))
    }
}
