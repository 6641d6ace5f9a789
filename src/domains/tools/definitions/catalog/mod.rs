//! Schema and table browsing tools.

pub mod get_table_rows;
pub mod list_databases;
pub mod list_tables;

pub use get_table_rows::{GetTableRowsParams, GetTableRowsTool};
pub use list_databases::{ListDatabasesParams, ListDatabasesTool};
pub use list_tables::{ListTablesParams, ListTablesTool};
