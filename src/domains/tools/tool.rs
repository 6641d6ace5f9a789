//! The shape every database tool shares.
//!
//! A tool supplies its name, description, parameter type and `execute()`.
//! The default methods turn that into the rmcp metadata, the STDIO route and
//! the HTTP handler, so each definition file only holds its own logic.

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::context::ToolContext;
use super::error::ToolError;

pub trait DbTool: Send + Sync + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    type Params: DeserializeOwned + JsonSchema + Send + 'static;

    /// Run the tool against the shared context.
    fn execute(
        params: Self::Params,
        ctx: Arc<ToolContext>,
    ) -> impl Future<Output = Result<CallToolResult, ToolError>> + Send;

    /// Decode call arguments into the parameter type.
    fn parse_params(arguments: JsonObject) -> Result<Self::Params, ToolError> {
        serde_json::from_value(Value::Object(arguments))
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))
    }

    /// Create a Tool model for this tool (metadata).
    fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<Self::Params>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO transport.
    fn create_route<S>(ctx: Arc<ToolContext>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |call: ToolCallContext<'_, S>| {
            let args = call.arguments.clone().unwrap_or_default();
            let ctx = ctx.clone();
            async move {
                let params = Self::parse_params(args).map_err(|e| e.to_mcp_error())?;
                Self::execute(params, ctx)
                    .await
                    .map_err(|e| e.to_mcp_error())
            }
            .boxed()
        })
    }

    /// HTTP handler for this tool (for HTTP transport).
    ///
    /// Returns the serialized `CallToolResult` (`content`,
    /// `structuredContent`, `isError`).
    fn http_handler(
        arguments: Value,
        ctx: Arc<ToolContext>,
    ) -> impl Future<Output = Result<Value, ToolError>> + Send {
        async move {
            let arguments = match arguments {
                Value::Object(map) => map,
                Value::Null => JsonObject::new(),
                other => {
                    return Err(ToolError::invalid_arguments(format!(
                        "arguments must be an object, got {}",
                        other
                    )));
                }
            };
            let params = Self::parse_params(arguments)?;
            let result = Self::execute(params, ctx).await?;
            Ok(serde_json::to_value(&result)?)
        }
    }
}
