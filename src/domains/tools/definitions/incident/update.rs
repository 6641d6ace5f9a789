//! Update incident tool definition.
//!
//! Partial update: only supplied fields change. Nullable fields can be reset
//! to NULL by naming them in `clear`.

use std::sync::Arc;

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::super::common::text_result;
use super::model::{ClearableField, IncidentPatch, IncidentState};
use crate::core::database::Update;
use crate::domains::tools::{DbTool, ToolContext, ToolError};

/// Parameters for the update incident tool.
///
/// Omitted and `null` fields are left unchanged.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateIncidentParams {
    /// Number of the incident to update.
    pub number: String,

    #[serde(default)]
    pub short_description: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub resolution_code: Option<String>,

    #[serde(default)]
    pub resolution_notes: Option<String>,

    #[serde(default)]
    pub state: Option<IncidentState>,

    #[serde(default)]
    pub assigned_to: Option<String>,

    /// Nullable fields to reset to NULL.
    #[serde(default)]
    pub clear: Option<Vec<ClearableField>>,
}

impl UpdateIncidentParams {
    /// Build the field mask from the supplied fields.
    pub fn patch(&self) -> Result<IncidentPatch, ToolError> {
        let mut patch = IncidentPatch::new();
        patch.set("short_description", self.short_description.clone());
        patch.set("description", self.description.clone());
        patch.set("resolution_code", self.resolution_code.clone());
        patch.set("resolution_notes", self.resolution_notes.clone());
        patch.set("state", self.state.map(|s| s.as_str()));
        patch.set("assigned_to", self.assigned_to.clone());
        for field in self.clear.iter().flatten() {
            patch.clear(*field)?;
        }
        Ok(patch)
    }
}

pub struct UpdateIncidentTool;

impl DbTool for UpdateIncidentTool {
    const NAME: &'static str = "update_incident";

    const DESCRIPTION: &'static str =
        "Update an existing incident. Only the fields provided are changed. To reset \
         resolution_code, resolution_notes or assigned_to to empty, list them in `clear`.";

    type Params = UpdateIncidentParams;

    #[instrument(skip_all, fields(number = %params.number))]
    async fn execute(
        params: UpdateIncidentParams,
        ctx: Arc<ToolContext>,
    ) -> Result<CallToolResult, ToolError> {
        let patch = params.patch()?;
        if patch.is_empty() {
            info!("No fields to update for incident {}", params.number);
            return Ok(text_result(format!(
                "No fields provided to update for incident {}.",
                params.number
            )));
        }

        let update = patch.apply(Update::new(ctx.incidents(), "number", &params.number));
        let mut qb = update.build();

        let mut conn = ctx.database().acquire().await?;
        let rows_affected = qb.build().execute(&mut *conn).await?.rows_affected();

        if rows_affected == 0 {
            info!("No incident found with number {}", params.number);
            return Ok(text_result(format!(
                "No incident found with number {}.",
                params.number
            )));
        }

        info!("Updated incident {} ({} rows)", params.number, rows_affected);

        Ok(text_result(format!(
            "Incident {} updated successfully. {} row(s) affected.",
            params.number, rows_affected
        )))
    }
}
