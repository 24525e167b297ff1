use super::{ValidationError, check_plain_name, push};
use crate::model::{ClusterDocument, GROUP_ORGANISATIONS, GROUP_USER_APIS, REQUIRED_USER_APIS};

/// Validates a cluster document against its siblings. User API and member
/// findings land under the fixed child-group scopes.
pub fn validate_cluster(
    cluster: &ClusterDocument,
    siblings: &[ClusterDocument],
) -> Vec<ValidationError> {
    let mut findings = Vec::new();

    check_plain_name(&mut findings, &cluster.id, "name", "cluster name", &cluster.name);

    let name_key = cluster.name.trim().to_lowercase();
    if !name_key.is_empty()
        && siblings
            .iter()
            .any(|s| s.id != cluster.id && s.name.trim().to_lowercase() == name_key)
    {
        push(
            &mut findings,
            &cluster.id,
            "name",
            format!("a cluster named '{}' already exists", cluster.name.trim()),
        );
    }

    if cluster.application.trim().is_empty() {
        push(
            &mut findings,
            &cluster.id,
            "application",
            "application is required",
        );
    }

    let apis_scope = format!("{}|{}", cluster.id, GROUP_USER_APIS);
    for api in REQUIRED_USER_APIS {
        let value = cluster.user_apis.get(*api).map(String::as_str).unwrap_or("");
        if value.trim().is_empty() {
            push(
                &mut findings,
                &apis_scope,
                api,
                format!("{} URL is required", api),
            );
        }
    }
    for (api, value) in &cluster.user_apis {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        if !value.starts_with("https://") {
            push(
                &mut findings,
                &apis_scope,
                api,
                format!("{} URL must start with https://", api),
            );
        } else if url::Url::parse(value).is_err() {
            push(
                &mut findings,
                &apis_scope,
                api,
                format!("{} URL is not a well-formed URL", api),
            );
        }
    }

    let members_scope = format!("{}|{}", cluster.id, GROUP_ORGANISATIONS);
    if cluster.organisations.is_empty() {
        push(
            &mut findings,
            &members_scope,
            "organisations",
            "at least one member organisation is required",
        );
        return findings;
    }

    if cluster.organisations.iter().any(|m| m.trim().is_empty()) {
        push(
            &mut findings,
            &members_scope,
            "organisations",
            "member names must not be empty",
        );
    }
    if cluster.organisations.iter().any(|m| m.contains('|')) {
        push(
            &mut findings,
            &members_scope,
            "organisations",
            "member names must not contain '|'",
        );
    }

    let mut seen = Vec::new();
    for member in &cluster.organisations {
        let key = member.trim().to_lowercase();
        if seen.contains(&key) {
            push(
                &mut findings,
                &members_scope,
                "organisations",
                "member names must be unique",
            );
            break;
        }
        seen.push(key);
    }

    findings
}
