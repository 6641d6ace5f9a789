//! Knowledge base tools.

pub mod search;

pub use search::{KB_COLUMNS, SearchKbParams, SearchKbTool};
