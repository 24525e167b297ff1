use std::collections::BTreeMap;

use super::*;
use crate::model::{ClusterDocument, ConfigurationDocument, Organisation, REQUIRED_USER_APIS};

fn org(name: &str) -> Organisation {
    let mut org = Organisation::named(name);
    org.server = "db1".to_string();
    org.database = "main".to_string();
    org.user_id = "svc".to_string();
    org.password = "pw".to_string();
    org.recompose_connection_string();
    org.elastic_alias = format!("{}-alias", name.trim().to_lowercase());
    org.elastic_nodes = vec![format!("{}-node-1", name.trim().to_lowercase())];
    org
}

fn configuration(id: &str, name: &str, organisations: Vec<Organisation>) -> ConfigurationDocument {
    ConfigurationDocument {
        id: id.to_string(),
        config_type: "configuration".to_string(),
        version: 1,
        name: name.to_string(),
        created: String::new(),
        last_updated: String::new(),
        created_by: String::new(),
        last_updated_by: String::new(),
        organisations,
    }
}

fn cluster(id: &str, name: &str) -> ClusterDocument {
    let mut user_apis = BTreeMap::new();
    for api in REQUIRED_USER_APIS {
        user_apis.insert(
            api.to_string(),
            format!("https://api.example/{}", api.to_lowercase()),
        );
    }
    ClusterDocument {
        id: id.to_string(),
        config_type: "cluster".to_string(),
        version: 1,
        name: name.to_string(),
        application: "imanage".to_string(),
        created: String::new(),
        last_updated: String::new(),
        created_by: String::new(),
        last_updated_by: String::new(),
        user_apis,
        organisations: vec!["OrgA".to_string()],
    }
}

fn messages_for<'a>(findings: &'a [ValidationError], id: &str, field: &str) -> Vec<&'a str> {
    findings
        .iter()
        .filter(|f| f.id == id && f.field == field)
        .flat_map(|f| f.errors.iter().map(String::as_str))
        .collect()
}

#[test]
fn a_complete_document_has_no_findings() {
    let doc = configuration("doc1", "Alpha", vec![org("OrgA"), org("OrgB")]);
    assert!(validate_document(&doc, &[]).is_empty());
}

#[test]
fn push_collects_repeated_problems_under_one_finding() {
    let mut findings = Vec::new();
    push(&mut findings, "doc1", "name", "first");
    push(&mut findings, "doc1", "name", "second");
    push(&mut findings, "doc1", "organisations", "other");
    assert_eq!(findings.len(), 2);
    assert_eq!(messages_for(&findings, "doc1", "name"), ["first", "second"]);
}

#[test]
fn names_may_not_contain_the_path_separator() {
    let doc = configuration("doc1", "bad|name", vec![org("OrgA")]);
    let findings = validate_document(&doc, &[]);
    let messages = messages_for(&findings, "doc1", "name");
    assert_eq!(messages, ["configuration name must not contain '|'"]);
}

#[test]
fn duplicate_document_names_are_rejected_case_insensitively() {
    let doc = configuration("doc1", "  Alpha ", vec![org("OrgA")]);
    let sibling = configuration("doc2", "alpha", vec![org("OrgB")]);
    let findings = validate_document(&doc, &[sibling]);
    let messages = messages_for(&findings, "doc1", "name");
    assert_eq!(messages, ["a configuration named 'Alpha' already exists"]);
}

#[test]
fn a_document_needs_at_least_one_organisation() {
    let doc = configuration("doc1", "Alpha", Vec::new());
    let findings = validate_document(&doc, &[]);
    assert_eq!(
        messages_for(&findings, "doc1", "organisations"),
        ["at least one organisation is required"]
    );
}

#[test]
fn organisation_findings_are_scoped_under_the_record() {
    let mut broken = org("OrgA");
    broken.server = String::new();
    let doc = configuration("doc1", "Alpha", vec![broken]);
    let findings = validate_document(&doc, &[]);
    assert_eq!(
        messages_for(&findings, "doc1|OrgA", "server"),
        ["server is required"]
    );
}

#[test]
fn duplicate_organisation_names_are_flagged() {
    let doc = configuration("doc1", "Alpha", vec![org("OrgA"), org(" orga ")]);
    let findings = validate_document(&doc, &[]);
    let messages = messages_for(&findings, "doc1| orga ", "organisationName");
    assert_eq!(messages, ["duplicate organisation name ' orga '"]);
}

#[test]
fn an_organisation_needs_alias_and_nodes() {
    let mut bare = Organisation::named("OrgA");
    bare.server = "db1".to_string();
    bare.database = "main".to_string();
    bare.user_id = "svc".to_string();
    bare.password = "pw".to_string();
    let findings = validate_organisation(&bare);
    assert_eq!(
        messages_for(&findings, "OrgA", "elasticAlias"),
        ["elastic alias is required"]
    );
    assert_eq!(
        messages_for(&findings, "OrgA", "elasticNodes"),
        ["at least one elastic node is required"]
    );
}

#[test]
fn elastic_node_names_must_be_present_and_unique() {
    let mut doubled = org("OrgA");
    doubled.elastic_nodes = vec!["n1".to_string(), "  ".to_string(), "N1".to_string()];
    let findings = validate_organisation(&doubled);
    let messages = messages_for(&findings, "OrgA", "elasticNodes");
    assert!(messages.contains(&"elastic node names must not be empty"));
    assert!(messages.contains(&"elastic node names must be unique"));
}

#[test]
fn a_complete_cluster_has_no_findings() {
    assert!(validate_cluster(&cluster("c1", "East"), &[]).is_empty());
}

#[test]
fn required_user_apis_land_under_the_api_group_scope() {
    let mut missing = cluster("c1", "East");
    missing.user_apis.remove("Lookups");
    let findings = validate_cluster(&missing, &[]);
    assert_eq!(
        messages_for(&findings, "c1|user-apis", "Lookups"),
        ["Lookups URL is required"]
    );
}

#[test]
fn user_api_urls_must_be_https_and_well_formed() {
    let mut bad = cluster("c1", "East");
    bad.user_apis
        .insert("iManage".to_string(), "http://api.example/imanage".to_string());
    bad.user_apis
        .insert("Billing".to_string(), "https://api example/billing".to_string());
    let findings = validate_cluster(&bad, &[]);
    assert_eq!(
        messages_for(&findings, "c1|user-apis", "iManage"),
        ["iManage URL must start with https://"]
    );
    assert_eq!(
        messages_for(&findings, "c1|user-apis", "Billing"),
        ["Billing URL is not a well-formed URL"]
    );
}

#[test]
fn member_findings_land_under_the_organisations_group_scope() {
    let mut empty = cluster("c1", "East");
    empty.organisations.clear();
    let findings = validate_cluster(&empty, &[]);
    assert_eq!(
        messages_for(&findings, "c1|organisations", "organisations"),
        ["at least one member organisation is required"]
    );

    let mut piped = cluster("c2", "West");
    piped.organisations = vec!["Org|A".to_string()];
    let findings = validate_cluster(&piped, &[]);
    assert_eq!(
        messages_for(&findings, "c2|organisations", "organisations"),
        ["member names must not contain '|'"]
    );
}

#[test]
fn duplicate_cluster_names_are_rejected() {
    let findings = validate_cluster(&cluster("c1", "East"), &[cluster("c2", " east ")]);
    assert_eq!(
        messages_for(&findings, "c1", "name"),
        ["a cluster named 'East' already exists"]
    );
}

#[test]
fn a_cluster_needs_an_application() {
    let mut blank = cluster("c1", "East");
    blank.application = "  ".to_string();
    let findings = validate_cluster(&blank, &[]);
    assert_eq!(
        messages_for(&findings, "c1", "application"),
        ["application is required"]
    );
}
