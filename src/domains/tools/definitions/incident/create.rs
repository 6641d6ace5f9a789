//! Create incident tool definition.

use std::sync::Arc;

use chrono::NaiveDateTime;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::super::common::{deserialize_timestamp, text_result};
use super::model::IncidentState;
use crate::domains::tools::{DbTool, ToolContext, ToolError};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the create incident tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateIncidentParams {
    /// Unique incident number, e.g. "INC0010001".
    pub number: String,

    /// When the incident was opened, ISO-8601 (e.g. "2024-05-01T09:30:00").
    #[serde(deserialize_with = "deserialize_timestamp")]
    #[schemars(with = "String")]
    pub opened: NaiveDateTime,

    /// One-line summary.
    pub short_description: String,

    /// Full description.
    pub description: String,

    #[serde(default)]
    pub resolution_code: Option<String>,

    #[serde(default)]
    pub resolution_notes: Option<String>,

    /// Initial state (default: New).
    #[serde(default)]
    pub state: Option<IncidentState>,

    /// Person or group the incident is assigned to.
    #[serde(default)]
    pub assigned_to: Option<String>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Create incident tool - inserts one row into the incidents table.
pub struct CreateIncidentTool;

impl DbTool for CreateIncidentTool {
    const NAME: &'static str = "create_incident";

    const DESCRIPTION: &'static str =
        "Create a new incident record. `state` defaults to 'New' and must be one of \
         'New', 'In Progress', 'Resolved', 'Closed'.";

    type Params = CreateIncidentParams;

    #[instrument(skip_all, fields(number = %params.number))]
    async fn execute(
        params: CreateIncidentParams,
        ctx: Arc<ToolContext>,
    ) -> Result<CallToolResult, ToolError> {
        let state = params.state.unwrap_or_default();
        let sql = format!(
            "INSERT INTO {} (number, opened, short_description, description, \
             resolution_code, resolution_notes, state, assigned_to) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            ctx.incidents().quoted()
        );

        let mut conn = ctx.database().acquire().await?;
        sqlx::query(&sql)
            .bind(&params.number)
            .bind(params.opened)
            .bind(&params.short_description)
            .bind(&params.description)
            .bind(params.resolution_code.as_deref())
            .bind(params.resolution_notes.as_deref())
            .bind(state.as_str())
            .bind(params.assigned_to.as_deref())
            .execute(&mut *conn)
            .await?;

        info!("Created incident {} ({})", params.number, state);

        Ok(text_result(format!(
            "Incident {} created successfully with state '{}'.",
            params.number, state
        )))
    }
}
