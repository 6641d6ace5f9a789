//! Get table rows tool definition.
//!
//! Returns up to `limit` rows of any table as column→value objects.

use std::sync::Arc;

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::super::common::{DEFAULT_ROW_LIMIT, json_result, rows_to_json};
use crate::core::security::TableRef;
use crate::domains::tools::{DbTool, ToolContext, ToolError};

/// Parameters for the get table rows tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetTableRowsParams {
    /// Database (schema) containing the table.
    pub schema: String,

    /// Table to read.
    pub table: String,

    /// Maximum number of rows to return (default: 100).
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Get table rows tool - `SELECT * FROM schema.table LIMIT n`.
pub struct GetTableRowsTool;

impl DbTool for GetTableRowsTool {
    const NAME: &'static str = "get_table_rows";

    const DESCRIPTION: &'static str =
        "Retrieve up to `limit` rows (default 100) from the specified schema and table. \
         Each row is an object keyed by column name.";

    type Params = GetTableRowsParams;

    #[instrument(skip_all, fields(schema = %params.schema, table = %params.table))]
    async fn execute(
        params: GetTableRowsParams,
        ctx: Arc<ToolContext>,
    ) -> Result<CallToolResult, ToolError> {
        let table = TableRef::new(&params.schema, &params.table)?;
        let limit = params.limit.unwrap_or(DEFAULT_ROW_LIMIT);

        let sql = format!("SELECT * FROM {} LIMIT ?", table.quoted());
        let mut conn = ctx.database().acquire().await?;
        let rows = sqlx::query(&sql).bind(limit).fetch_all(&mut *conn).await?;

        info!("Fetched {} rows from {}", rows.len(), table);

        json_result("rows", rows_to_json(&rows))
    }
}
