use carelink_aggir::ScoringResult;
use serde::Serialize;
use tracing::info;

use crate::error::AuditError;

pub const ACTION_GIR_COMPUTED: &str = "gir.computed";
pub const RESOURCE_PATIENT_EVALUATION: &str = "patient_evaluation";

/// A structured audit event for logging API actions.
///
/// These events are logged via `tracing` so they land in the same log
/// pipeline as the service itself.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    pub user_id: String,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        action: impl Into<String>,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            user_id: user_id.into(),
            details: None,
        }
    }

    /// A GIR computed for an evaluation, with the whole scoring record
    /// (group scores, letters, matched row) as details.
    pub fn gir_computed(
        evaluation_id: impl Into<String>,
        user_id: impl Into<String>,
        result: &ScoringResult,
    ) -> Result<Self, AuditError> {
        let details = serde_json::to_value(result)?;
        Ok(Self::new(
            ACTION_GIR_COMPUTED,
            RESOURCE_PATIENT_EVALUATION,
            evaluation_id,
            user_id,
        )
        .with_details(details))
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        info!(
            audit.action = %self.action,
            audit.resource_type = %self.resource_type,
            audit.resource_id = %self.resource_id,
            audit.user_id = %self.user_id,
            audit.details = %details,
            "audit event"
        );
    }
}
