//! Tools domain module.
//!
//! Tools are the operations MCP clients invoke against the incident and
//! knowledge-base tables.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `tool.rs` - The `DbTool` trait every definition implements
//! - `context.rs` - Pool and table locations shared by all tools
//! - `router.rs` - Dynamic ToolRouter builder for STDIO transport
//! - `registry.rs` - Central tool registry and HTTP dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` implementing `DbTool`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add its route in `router.rs` using `with_route()`
//! 4. Register it in `registry.rs` for HTTP support

pub mod context;
pub mod definitions;
mod error;
mod registry;
pub mod router;
mod tool;

pub use context::ToolContext;
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
pub use tool::DbTool;
