use super::organisations::validate_organisation;
use super::{ValidationError, check_plain_name, push};
use crate::model::ConfigurationDocument;

/// Validates a configuration document against its siblings. Organisation
/// findings are re-scoped under the record id so each maps to a tree node.
pub fn validate_document(
    doc: &ConfigurationDocument,
    siblings: &[ConfigurationDocument],
) -> Vec<ValidationError> {
    let mut findings = Vec::new();

    check_plain_name(&mut findings, &doc.id, "name", "configuration name", &doc.name);

    let name_key = doc.name.trim().to_lowercase();
    if !name_key.is_empty()
        && siblings
            .iter()
            .any(|s| s.id != doc.id && s.name.trim().to_lowercase() == name_key)
    {
        push(
            &mut findings,
            &doc.id,
            "name",
            format!("a configuration named '{}' already exists", doc.name.trim()),
        );
    }

    if doc.organisations.is_empty() {
        push(
            &mut findings,
            &doc.id,
            "organisations",
            "at least one organisation is required",
        );
        return findings;
    }

    let mut seen = Vec::new();
    for org in &doc.organisations {
        let key = org.organisation_name.trim().to_lowercase();
        if seen.contains(&key) {
            push(
                &mut findings,
                &format!("{}|{}", doc.id, org.organisation_name),
                "organisationName",
                format!("duplicate organisation name '{}'", org.organisation_name),
            );
        }
        seen.push(key);
    }

    for org in &doc.organisations {
        for finding in validate_organisation(org) {
            let scoped = format!("{}|{}", doc.id, finding.id);
            for message in finding.errors {
                push(&mut findings, &scoped, &finding.field, message);
            }
        }
    }

    findings
}
