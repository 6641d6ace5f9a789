//! List tables tool definition.
//!
//! Lists the tables of one schema from `information_schema`.

use std::sync::Arc;

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use super::super::common::json_result;
use crate::core::security::validate_identifier;
use crate::domains::tools::{DbTool, ToolContext, ToolError};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the list tables tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListTablesParams {
    /// Database (schema) whose tables to list.
    pub schema: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// List tables tool - lists table names in a schema.
pub struct ListTablesTool;

impl DbTool for ListTablesTool {
    const NAME: &'static str = "list_tables";

    const DESCRIPTION: &'static str = "List tables in a given database (schema).";

    type Params = ListTablesParams;

    #[instrument(skip_all, fields(schema = %params.schema))]
    async fn execute(
        params: ListTablesParams,
        ctx: Arc<ToolContext>,
    ) -> Result<CallToolResult, ToolError> {
        let schema = validate_identifier(&params.schema, "schema")?;

        let mut conn = ctx.database().acquire().await?;
        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT CAST(TABLE_NAME AS CHAR) FROM information_schema.tables \
             WHERE TABLE_SCHEMA = ? ORDER BY TABLE_NAME",
        )
        .bind(schema)
        .fetch_all(&mut *conn)
        .await?;

        info!("Listed {} tables in {}", tables.len(), schema);

        json_result(
            "tables",
            Value::Array(tables.into_iter().map(Value::String).collect()),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
