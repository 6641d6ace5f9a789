//! Search incidents tool definition.

use std::sync::Arc;

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::super::common::{DEFAULT_SEARCH_LIMIT, json_result, rows_to_json};
use super::model::{INCIDENT_COLUMNS, IncidentState};
use crate::core::database::{Filters, Select};
use crate::domains::tools::{DbTool, ToolContext, ToolError};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the search incidents tool. All filters are optional and
/// combined with AND.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SearchIncidentsParams {
    /// Exact incident number.
    #[serde(default)]
    pub number: Option<String>,

    /// Exact state.
    #[serde(default)]
    pub state: Option<IncidentState>,

    /// Exact assignee.
    #[serde(default)]
    pub assigned_to: Option<String>,

    /// Substring of the short description.
    #[serde(default)]
    pub short_description_contains: Option<String>,

    /// Maximum number of incidents to return (default: 10).
    #[serde(default)]
    pub limit: Option<u32>,
}

impl SearchIncidentsParams {
    pub fn filters(&self) -> Filters {
        Filters::new()
            .eq("number", self.number.clone())
            .eq("state", self.state.map(|s| s.as_str()))
            .eq("assigned_to", self.assigned_to.clone())
            .contains("short_description", self.short_description_contains.clone())
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Search incidents tool - newest-opened first.
pub struct SearchIncidentsTool;

impl DbTool for SearchIncidentsTool {
    const NAME: &'static str = "search_incidents";

    const DESCRIPTION: &'static str =
        "Search incidents by number, state, assignee or a substring of the short \
         description. Results are ordered by opened date, newest first (default limit 10).";

    type Params = SearchIncidentsParams;

    #[instrument(skip_all)]
    async fn execute(
        params: SearchIncidentsParams,
        ctx: Arc<ToolContext>,
    ) -> Result<CallToolResult, ToolError> {
        let filters = params.filters();
        debug!("Incident filters: {:?}", filters.predicates());

        let mut qb = Select::new(ctx.incidents(), INCIDENT_COLUMNS)
            .filters(filters)
            .newest_first_by("opened")
            .limit(params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT))
            .build();

        let mut conn = ctx.database().acquire().await?;
        let rows = qb.build().fetch_all(&mut *conn).await?;

        info!("Found {} incidents", rows.len());

        json_result("incidents", rows_to_json(&rows))
    }
}
