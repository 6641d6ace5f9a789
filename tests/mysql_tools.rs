//! End-to-end tool tests against a real MySQL server.
//!
//! Ignored by default. Run with a disposable server:
//!
//! ```text
//! MCP_TEST_DB_HOST=127.0.0.1 MCP_TEST_DB_PASSWORD=root cargo test -- --ignored
//! ```
//!
//! Each test creates its own schema and drops it afterwards.

use std::sync::Arc;

use chrono::NaiveDateTime;
use rmcp::model::{CallToolResult, RawContent};
use serde_json::{Value, json};

use incident_mcp_server::core::Database;
use incident_mcp_server::core::config::{DatabaseConfig, TablesConfig};
use incident_mcp_server::domains::tools::definitions::{
    CreateIncidentTool, GetTableRowsTool, ListDatabasesTool, SearchIncidentsTool, SearchKbTool,
    UpdateIncidentTool,
};
use incident_mcp_server::domains::tools::{DbTool, ToolContext};

fn db_config() -> DatabaseConfig {
    let env = |key: &str, default: &str| std::env::var(key).unwrap_or_else(|_| default.to_string());
    DatabaseConfig {
        host: env("MCP_TEST_DB_HOST", "localhost"),
        port: env("MCP_TEST_DB_PORT", "3306").parse().unwrap(),
        user: env("MCP_TEST_DB_USER", "root"),
        password: env("MCP_TEST_DB_PASSWORD", "root"),
        ..Default::default()
    }
}

struct Fixture {
    schema: String,
    database: Database,
    ctx: Arc<ToolContext>,
}

impl Fixture {
    async fn new(name: &str) -> Self {
        let schema = format!("mcp_it_{}_{}", name, std::process::id());
        let database = Database::connect(&db_config()).await.unwrap();

        let mut conn = database.acquire().await.unwrap();
        for statement in [
            format!("DROP DATABASE IF EXISTS `{schema}`"),
            format!("CREATE DATABASE `{schema}`"),
            format!(
                "CREATE TABLE `{schema}`.`incidents` (
                    number VARCHAR(32) PRIMARY KEY,
                    opened DATETIME NOT NULL,
                    short_description VARCHAR(255) NOT NULL,
                    description TEXT NOT NULL,
                    resolution_code VARCHAR(64) NULL,
                    resolution_notes TEXT NULL,
                    state VARCHAR(32) NOT NULL DEFAULT 'New',
                    assigned_to VARCHAR(128) NULL
                )"
            ),
            format!(
                "CREATE TABLE `{schema}`.`kb` (
                    number VARCHAR(32) NOT NULL,
                    version VARCHAR(16) NOT NULL,
                    short_description VARCHAR(255) NOT NULL,
                    author VARCHAR(128) NULL,
                    category VARCHAR(64) COLLATE utf8mb4_bin NULL,
                    workflow VARCHAR(32) NULL,
                    updated DATETIME NULL,
                    PRIMARY KEY (number, version)
                )"
            ),
        ] {
            sqlx::raw_sql(&statement).execute(&mut *conn).await.unwrap();
        }
        drop(conn);

        let tables = TablesConfig {
            incidents: format!("{schema}.incidents"),
            knowledge_base: format!("{schema}.kb"),
        };
        let ctx = Arc::new(ToolContext::new(database.clone(), &tables).unwrap());

        Self {
            schema,
            database,
            ctx,
        }
    }

    async fn teardown(self) {
        let mut conn = self.database.acquire().await.unwrap();
        sqlx::raw_sql(&format!("DROP DATABASE IF EXISTS `{}`", self.schema))
            .execute(&mut *conn)
            .await
            .unwrap();
        drop(conn);
        self.database.close().await;
    }

    async fn exec(&self, statement: &str) {
        let mut conn = self.database.acquire().await.unwrap();
        sqlx::raw_sql(statement).execute(&mut *conn).await.unwrap();
    }

    async fn create(&self, number: &str, opened: &str, state: Option<&str>) {
        let mut args = json!({
            "number": number,
            "opened": opened,
            "short_description": format!("{number} printer offline"),
            "description": "The printer does not respond"
        });
        if let Some(state) = state {
            args["state"] = json!(state);
        }
        CreateIncidentTool::http_handler(args, self.ctx.clone())
            .await
            .unwrap();
    }

    async fn search(&self, args: Value) -> Vec<Value> {
        let result = SearchIncidentsTool::http_handler(args, self.ctx.clone())
            .await
            .unwrap();
        result["structuredContent"]["incidents"]
            .as_array()
            .unwrap()
            .clone()
    }
}

fn text(result: &CallToolResult) -> String {
    match &result.content[0].raw {
        RawContent::Text(text) => text.text.clone(),
        _ => panic!("Expected text content"),
    }
}

#[tokio::test]
#[ignore = "requires a MySQL server"]
async fn test_create_then_search_defaults_state() {
    let fx = Fixture::new("create").await;

    let params = serde_json::from_value(json!({
        "number": "INC0001",
        "opened": "2024-05-01T09:30:00",
        "short_description": "VPN down",
        "description": "Nobody can connect",
        "assigned_to": "network"
    }))
    .unwrap();
    let result = CreateIncidentTool::execute(params, fx.ctx.clone())
        .await
        .unwrap();
    assert_eq!(
        text(&result),
        "Incident INC0001 created successfully with state 'New'."
    );

    let found = fx.search(json!({ "number": "INC0001" })).await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["state"], "New");
    assert_eq!(found[0]["short_description"], "VPN down");
    assert_eq!(found[0]["assigned_to"], "network");
    assert_eq!(found[0]["resolution_code"], Value::Null);

    fx.teardown().await;
}

#[tokio::test]
#[ignore = "requires a MySQL server"]
async fn test_search_is_newest_first_and_filtered() {
    let fx = Fixture::new("order").await;
    fx.create("INC1", "2024-01-01T00:00:00", None).await;
    fx.create("INC2", "2024-03-01T00:00:00", Some("In Progress")).await;
    fx.create("INC3", "2024-02-01T00:00:00", Some("In Progress")).await;

    let all = fx.search(json!({})).await;
    let numbers: Vec<_> = all.iter().map(|i| i["number"].as_str().unwrap()).collect();
    assert_eq!(numbers, vec!["INC2", "INC3", "INC1"]);

    let in_progress = fx.search(json!({ "state": "In Progress", "limit": 1 })).await;
    assert_eq!(in_progress.len(), 1);
    assert_eq!(in_progress[0]["number"], "INC2");

    let wildcard = fx
        .search(json!({ "short_description_contains": "%" }))
        .await;
    assert!(wildcard.is_empty());

    fx.teardown().await;
}

#[tokio::test]
#[ignore = "requires a MySQL server"]
async fn test_update_paths() {
    let fx = Fixture::new("update").await;
    fx.create("INC1", "2024-01-01T00:00:00", None).await;

    let missing = UpdateIncidentTool::execute(
        serde_json::from_value(json!({ "number": "NOPE", "state": "Closed" })).unwrap(),
        fx.ctx.clone(),
    )
    .await
    .unwrap();
    assert_eq!(text(&missing), "No incident found with number NOPE.");

    let updated = UpdateIncidentTool::execute(
        serde_json::from_value(json!({
            "number": "INC1",
            "state": "Resolved",
            "resolution_code": "FIXED"
        }))
        .unwrap(),
        fx.ctx.clone(),
    )
    .await
    .unwrap();
    assert_eq!(
        text(&updated),
        "Incident INC1 updated successfully. 1 row(s) affected."
    );

    UpdateIncidentTool::execute(
        serde_json::from_value(json!({ "number": "INC1", "clear": ["resolution_code"] }))
            .unwrap(),
        fx.ctx.clone(),
    )
    .await
    .unwrap();

    let found = fx.search(json!({ "number": "INC1" })).await;
    assert_eq!(found[0]["state"], "Resolved");
    assert_eq!(found[0]["resolution_code"], Value::Null);
    assert_eq!(found[0]["description"], "The printer does not respond");

    fx.teardown().await;
}

#[tokio::test]
#[ignore = "requires a MySQL server"]
async fn test_opened_round_trips() {
    let fx = Fixture::new("roundtrip").await;
    fx.create("INC1", "2024-05-01T09:30:15", None).await;

    let found = fx.search(json!({ "number": "INC1" })).await;
    let opened = found[0]["opened"].as_str().unwrap();
    let parsed = NaiveDateTime::parse_from_str(opened, "%Y-%m-%dT%H:%M:%S%.f").unwrap();
    assert_eq!(
        parsed,
        NaiveDateTime::parse_from_str("2024-05-01 09:30:15", "%Y-%m-%d %H:%M:%S").unwrap()
    );

    fx.teardown().await;
}

#[tokio::test]
#[ignore = "requires a MySQL server"]
async fn test_concurrent_table_reads() {
    let fx = Fixture::new("concurrent").await;
    fx.create("INC1", "2024-01-01T00:00:00", None).await;
    fx.create("INC2", "2024-01-02T00:00:00", None).await;

    let incidents = GetTableRowsTool::http_handler(
        json!({ "schema": fx.schema, "table": "incidents" }),
        fx.ctx.clone(),
    );
    let kb = GetTableRowsTool::http_handler(
        json!({ "schema": fx.schema, "table": "kb" }),
        fx.ctx.clone(),
    );
    let search = SearchKbTool::http_handler(json!({ "version": 1 }), fx.ctx.clone());
    let (incidents, kb, search) = tokio::join!(incidents, kb, search);

    assert_eq!(
        incidents.unwrap()["structuredContent"]["rows"]
            .as_array()
            .unwrap()
            .len(),
        2
    );
    assert!(
        kb.unwrap()["structuredContent"]["rows"]
            .as_array()
            .unwrap()
            .is_empty()
    );
    assert!(
        search.unwrap()["structuredContent"]["articles"]
            .as_array()
            .unwrap()
            .is_empty()
    );

    fx.teardown().await;
}

#[tokio::test]
#[ignore = "requires a MySQL server"]
async fn test_list_databases_hides_system_schemas() {
    let fx = Fixture::new("listdb").await;

    let result = ListDatabasesTool::http_handler(json!({}), fx.ctx.clone())
        .await
        .unwrap();
    let databases = result["structuredContent"]["databases"].as_array().unwrap();
    assert!(databases.contains(&json!(fx.schema)));
    for system in ["information_schema", "mysql", "performance_schema", "sys"] {
        assert!(!databases.contains(&json!(system)));
    }

    fx.teardown().await;
}

#[tokio::test]
#[ignore = "requires a MySQL server"]
async fn test_search_kb_order_rendering_and_filters() {
    let fx = Fixture::new("kb").await;
    fx.exec(&format!(
        "INSERT INTO `{}`.`kb` VALUES
            ('KB1', '1', 'Reset VPN token', 'ana', 'Network', 'Published', '2024-01-01 08:00:00'),
            ('KB2', '2', 'Replace toner', 'bob', 'Network', 'Published', '2024-03-01 10:15:30'),
            ('KB3', '1', 'Reseat RAM', 'ana', 'Hardware', 'Draft', NULL)",
        fx.schema
    ))
    .await;

    let search = |args: Value| {
        let ctx = fx.ctx.clone();
        async move {
            let result = SearchKbTool::http_handler(args, ctx).await.unwrap();
            result["structuredContent"]["articles"]
                .as_array()
                .unwrap()
                .clone()
        }
    };

    let all = search(json!({})).await;
    let numbers: Vec<_> = all.iter().map(|a| a["number"].as_str().unwrap()).collect();
    assert_eq!(numbers, vec!["KB2", "KB1", "KB3"]);
    assert_eq!(all[0]["updated"], "2024-03-01T10:15:30");
    assert_eq!(all[1]["updated"], "2024-01-01T08:00:00");
    assert_eq!(all[2]["updated"], Value::Null);
    // binary-collated text still comes back as text
    assert_eq!(all[0]["category"], "Network");

    let both = search(json!({ "author": "ana", "category": "Network" })).await;
    assert_eq!(both.len(), 1);
    assert_eq!(both[0]["number"], "KB1");

    let none = search(json!({ "author": "bob", "workflow": "Draft" })).await;
    assert!(none.is_empty());

    let by_version = search(json!({ "version": 2 })).await;
    assert_eq!(by_version.len(), 1);
    assert_eq!(by_version[0]["number"], "KB2");

    fx.teardown().await;
}
