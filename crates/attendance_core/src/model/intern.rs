//! Intern roster record.
//!
//! # Responsibility
//! - Describe one intern as owned by the external roster source.
//! - Provide the search predicate used by the selection workflow.
//!
//! # Invariants
//! - `id` is unique within one roster snapshot.
//! - Records are read-only inside core; edits happen upstream.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Stable identifier of an intern inside one roster.
pub type InternId = u64;

/// One intern/trainee as delivered by the roster source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intern {
    /// Roster-internal identifier used for selection and marking.
    pub id: InternId,
    /// Human-facing trainee code, e.g. `TR-2024-001`.
    pub trainee_id: String,
    /// Display name.
    pub trainee_name: String,
    /// May be missing for interns not yet assigned to a track.
    #[serde(default)]
    pub field_of_specialization: Option<String>,
}

impl Intern {
    /// Creates an intern without a specialization.
    pub fn new(
        id: InternId,
        trainee_id: impl Into<String>,
        trainee_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            trainee_id: trainee_id.into(),
            trainee_name: trainee_name.into(),
            field_of_specialization: None,
        }
    }

    /// Builder-style setter for the specialization.
    pub fn with_specialization(mut self, field: impl Into<String>) -> Self {
        self.field_of_specialization = Some(field.into());
        self
    }

    /// Returns whether trainee id or name matches the compiled search pattern.
    pub(crate) fn matches(&self, pattern: &Regex) -> bool {
        pattern.is_match(&self.trainee_id) || pattern.is_match(&self.trainee_name)
    }
}
