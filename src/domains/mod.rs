//! Domain modules.
//!
//! - **tools**: MCP tools over the incident and knowledge-base tables

pub mod tools;
