//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! Each tool knows how to create its own route; this module only lists them.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::context::ToolContext;
use super::definitions::{
    CreateIncidentTool, GetTableRowsTool, ListDatabasesTool, ListTablesTool, SearchIncidentsTool,
    SearchKbTool, UpdateIncidentTool,
};
use super::tool::DbTool;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(ctx: Arc<ToolContext>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(ListDatabasesTool::create_route(ctx.clone()))
        .with_route(ListTablesTool::create_route(ctx.clone()))
        .with_route(GetTableRowsTool::create_route(ctx.clone()))
        .with_route(CreateIncidentTool::create_route(ctx.clone()))
        .with_route(UpdateIncidentTool::create_route(ctx.clone()))
        .with_route(SearchIncidentsTool::create_route(ctx.clone()))
        .with_route(SearchKbTool::create_route(ctx))
}

#[cfg(test)]
mod tests {
    use super::super::context::testing::offline_context;
    use super::super::registry::ToolRegistry;
    use super::*;

    struct TestServer {}

    #[tokio::test]
    async fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(offline_context());
        let tools = router.list_all();
        assert_eq!(tools.len(), 7);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"list_databases"));
        assert!(names.contains(&"create_incident"));
        assert!(names.contains(&"search_kb"));
    }

    #[tokio::test]
    async fn test_registry_matches_router() {
        let ctx = offline_context();
        let registry = ToolRegistry::new(ctx.clone());
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(ctx);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
