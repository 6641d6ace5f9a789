//! Tool definitions module.
//!
//! Each tool is defined in its own file, grouped by the tables it works on.

pub mod catalog;
pub mod common;
pub mod incident;
pub mod kb;

pub use catalog::{
    GetTableRowsParams, GetTableRowsTool, ListDatabasesParams, ListDatabasesTool,
    ListTablesParams, ListTablesTool,
};
pub use incident::{
    CreateIncidentParams, CreateIncidentTool, SearchIncidentsParams, SearchIncidentsTool,
    UpdateIncidentParams, UpdateIncidentTool,
};
pub use kb::{SearchKbParams, SearchKbTool};
