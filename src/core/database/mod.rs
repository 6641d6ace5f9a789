//! MySQL access layer.
//!
//! - `pool`: the owned [`Database`] handle and its lifecycle
//! - `query`: typed SELECT/UPDATE builders that only ever bind values
//! - `row`: conversion of driver rows to plain JSON

pub mod pool;
pub mod query;
pub mod row;

pub use pool::{Database, DatabaseError};
pub use query::{Assignment, Filters, Op, Predicate, Select, Update};
pub use row::{iso_timestamp, row_to_json};
