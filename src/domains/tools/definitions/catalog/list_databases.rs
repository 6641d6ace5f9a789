//! List databases tool definition.

use std::sync::Arc;

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use super::super::common::json_result;
use crate::domains::tools::{DbTool, ToolContext, ToolError};

/// Schemas MySQL creates for itself; never reported.
pub const SYSTEM_SCHEMAS: [&str; 4] = ["information_schema", "mysql", "performance_schema", "sys"];

/// `list_databases` takes no arguments.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListDatabasesParams {}

pub struct ListDatabasesTool;

/// Drop system schemas, keeping server order.
pub fn user_databases(names: Vec<String>) -> Vec<String> {
    names
        .into_iter()
        .filter(|name| !SYSTEM_SCHEMAS.contains(&name.as_str()))
        .collect()
}

impl DbTool for ListDatabasesTool {
    const NAME: &'static str = "list_databases";

    const DESCRIPTION: &'static str = "List all non-system databases on the server.";

    type Params = ListDatabasesParams;

    #[instrument(skip_all)]
    async fn execute(
        _params: ListDatabasesParams,
        ctx: Arc<ToolContext>,
    ) -> Result<CallToolResult, ToolError> {
        let mut conn = ctx.database().acquire().await?;
        let names: Vec<String> = sqlx::query_scalar(
            "SELECT CAST(SCHEMA_NAME AS CHAR) FROM information_schema.schemata \
             ORDER BY SCHEMA_NAME",
        )
        .fetch_all(&mut *conn)
        .await?;

        let databases = user_databases(names);
        info!("Listed {} databases", databases.len());

        json_result(
            "databases",
            Value::Array(databases.into_iter().map(Value::String).collect()),
        )
    }
}
