//! Incident domain types shared by the incident tools.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::database::{Assignment, Update};
use crate::domains::tools::ToolError;

/// Columns returned by `search_incidents`, in output order.
pub const INCIDENT_COLUMNS: &[&str] = &[
    "number",
    "opened",
    "short_description",
    "description",
    "resolution_code",
    "resolution_notes",
    "state",
    "assigned_to",
];

/// Lifecycle state of an incident.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum IncidentState {
    #[default]
    New,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
    Closed,
}

impl IncidentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        }
    }
}

impl fmt::Display for IncidentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nullable incident columns that `update_incident` can reset to NULL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClearableField {
    ResolutionCode,
    ResolutionNotes,
    AssignedTo,
}

impl ClearableField {
    pub fn column(&self) -> &'static str {
        match self {
            Self::ResolutionCode => "resolution_code",
            Self::ResolutionNotes => "resolution_notes",
            Self::AssignedTo => "assigned_to",
        }
    }
}

/// Field mask for a partial incident update.
///
/// A column absent from the mask is left untouched. Present columns map to a
/// new value or to NULL, so "omitted" and "cleared" stay distinct.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncidentPatch {
    changes: Vec<(&'static str, Assignment)>,
}

impl IncidentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `column` to `value` when present.
    pub fn set<V: Into<String>>(&mut self, column: &'static str, value: Option<V>) {
        if let Some(value) = value {
            self.changes.push((column, Assignment::Value(value.into())));
        }
    }

    /// Reset a nullable column to NULL.
    ///
    /// Fails when the same column already carries a value, or was cleared
    /// twice.
    pub fn clear(&mut self, field: ClearableField) -> Result<(), ToolError> {
        let column = field.column();
        if self.changes.iter().any(|(c, _)| *c == column) {
            return Err(ToolError::invalid_arguments(format!(
                "'{}' is both set and cleared",
                column
            )));
        }
        self.changes.push((column, Assignment::Null));
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn changes(&self) -> &[(&'static str, Assignment)] {
        &self.changes
    }

    /// Add every change as a SET clause.
    pub fn apply<'a>(&self, update: Update<'a>) -> Update<'a> {
        self.changes
            .iter()
            .fold(update, |update, (column, assignment)| {
                update.set(*column, assignment.clone())
            })
    }
}
