//! Save-time validation. Findings are keyed by the tree scope they belong to
//! so the presentation can badge the offending nodes and fields.

use serde::{Deserialize, Serialize};

mod clusters;
mod documents;
mod organisations;

pub use clusters::validate_cluster;
pub use documents::validate_document;
pub use organisations::validate_organisation;

/// One validation finding. `id` is the scope: a record id for top-level
/// findings, a selection-path string for nested ones. `field` is the wire
/// name of the offending field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub id: String,
    pub field: String,
    pub errors: Vec<String>,
}

/// Appends a message to the finding for `(id, field)`, creating it on first
/// use so repeated problems on one field collect into a single entry.
pub(crate) fn push(
    findings: &mut Vec<ValidationError>,
    id: &str,
    field: &str,
    message: impl Into<String>,
) {
    if let Some(existing) = findings.iter_mut().find(|f| f.id == id && f.field == field) {
        existing.errors.push(message.into());
        return;
    }
    findings.push(ValidationError {
        id: id.to_string(),
        field: field.to_string(),
        errors: vec![message.into()],
    });
}

/// Shared name rule: required, and `|` is reserved as the selection-path
/// separator so names may never contain it.
pub(crate) fn check_plain_name(
    findings: &mut Vec<ValidationError>,
    id: &str,
    field: &str,
    label: &str,
    value: &str,
) {
    if value.trim().is_empty() {
        push(findings, id, field, format!("{} is required", label));
    } else if value.contains('|') {
        push(findings, id, field, format!("{} must not contain '|'", label));
    }
}

#[cfg(test)]
#[path = "tests/validate_tests.rs"]
mod tests;
