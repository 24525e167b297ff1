use super::{ValidationError, check_plain_name, push};
use crate::model::Organisation;

/// Validates one organisation in isolation. Findings are scoped by the
/// organisation name alone; callers validating a whole document re-scope
/// them under the owning record.
pub fn validate_organisation(org: &Organisation) -> Vec<ValidationError> {
    let mut findings = Vec::new();
    let scope = org.organisation_name.as_str();

    check_plain_name(
        &mut findings,
        scope,
        "organisationName",
        "organisation name",
        &org.organisation_name,
    );

    for (field, label, value) in [
        ("server", "server", &org.server),
        ("database", "database", &org.database),
        ("userId", "user id", &org.user_id),
        ("password", "password", &org.password),
    ] {
        if value.trim().is_empty() {
            push(&mut findings, scope, field, format!("{} is required", label));
        }
    }

    if org.elastic_alias.trim().is_empty() {
        push(
            &mut findings,
            scope,
            "elasticAlias",
            "elastic alias is required",
        );
    }

    if org.elastic_nodes.is_empty() {
        push(
            &mut findings,
            scope,
            "elasticNodes",
            "at least one elastic node is required",
        );
        return findings;
    }

    if org.elastic_nodes.iter().any(|n| n.trim().is_empty()) {
        push(
            &mut findings,
            scope,
            "elasticNodes",
            "elastic node names must not be empty",
        );
    }
    if org.elastic_nodes.iter().any(|n| n.contains('|')) {
        push(
            &mut findings,
            scope,
            "elasticNodes",
            "elastic node names must not contain '|'",
        );
    }

    let mut seen = Vec::new();
    for node in &org.elastic_nodes {
        let key = node.trim().to_lowercase();
        if seen.contains(&key) {
            push(
                &mut findings,
                scope,
                "elasticNodes",
                "elastic node names must be unique",
            );
            break;
        }
        seen.push(key);
    }

    findings
}
