//! Incident tools: create, partial update and search.

pub mod create;
pub mod model;
pub mod search;
pub mod update;

pub use create::{CreateIncidentParams, CreateIncidentTool};
pub use model::{ClearableField, INCIDENT_COLUMNS, IncidentPatch, IncidentState};
pub use search::{SearchIncidentsParams, SearchIncidentsTool};
pub use update::{UpdateIncidentParams, UpdateIncidentTool};
