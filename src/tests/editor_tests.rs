use std::collections::BTreeMap;

use super::*;
use crate::model::documents::PLACEHOLDER_CONFIGURATION;
use crate::model::{ClusterDocument, ConfigurationDocument, GROUP_USER_APIS, Organisation};

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
        created: "2026-01-05T09:00:00Z".to_string(),
        last_updated: "2026-01-05T09:00:00Z".to_string(),
        created_by: "dev".to_string(),
        last_updated_by: "dev".to_string(),
        organisations,
    }
}

fn cluster(id: &str, name: &str) -> ClusterDocument {
    let mut user_apis = BTreeMap::new();
    for api in crate::model::REQUIRED_USER_APIS {
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

fn loaded_editor() -> Editor<ConfigurationDocument> {
    let mut editor = Editor::default();
    editor.load(vec![
        configuration("doc1", "Alpha", vec![org("OrgA"), org("OrgB")]),
        configuration("doc2", "Beta", vec![org("OrgC")]),
    ]);
    editor
}

#[test]
fn load_sorts_records_by_natural_name_order() {
    let mut editor: Editor<ConfigurationDocument> = Editor::default();
    editor.load(vec![
        configuration("a", "Org 10", vec![org("OrgA")]),
        configuration("b", "Org 2", vec![org("OrgB")]),
    ]);
    let names: Vec<&str> = editor.documents().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["Org 2", "Org 10"]);
}

#[test]
fn edits_mark_dirty_and_reverting_clears_it() {
    let mut editor = loaded_editor();
    assert_eq!(
        editor.select(Some(SelectionPath::root("doc1"))),
        SelectOutcome::Applied
    );
    editor
        .apply_edit("doc1", |d| d.name = "Alpha 2".to_string())
        .unwrap();
    assert!(editor.is_modified("doc1"));
    assert!(editor.current_dirty());

    editor
        .apply_edit("doc1", |d| d.name = "Alpha".to_string())
        .unwrap();
    assert!(!editor.is_modified("doc1"));
    assert!(!editor.any_modified());
}

#[test]
fn audit_fields_never_count_as_changes() {
    let mut editor = loaded_editor();
    editor
        .apply_edit("doc1", |d| {
            d.last_updated = "2026-02-01T00:00:00Z".to_string();
            d.last_updated_by = "someone-else".to_string();
        })
        .unwrap();
    assert!(!editor.is_modified("doc1"));
}

#[test]
fn moves_inside_the_same_record_never_need_confirmation() {
    let mut editor = loaded_editor();
    editor.select(Some(SelectionPath::root("doc1")));
    editor
        .apply_edit("doc1", |d| d.name = "Alpha 2".to_string())
        .unwrap();
    let deeper = SelectionPath::root("doc1").child("OrgA");
    assert_eq!(editor.select(Some(deeper.clone())), SelectOutcome::Applied);
    assert_eq!(editor.selection(), Some(&deeper));
}

#[test]
fn leaving_a_dirty_record_parks_the_move() {
    let mut editor = loaded_editor();
    editor.select(Some(SelectionPath::root("doc1")));
    editor
        .apply_edit("doc1", |d| d.name = "Alpha 2".to_string())
        .unwrap();
    assert_eq!(
        editor.select(Some(SelectionPath::root("doc2"))),
        SelectOutcome::ConfirmationRequired
    );
    assert!(editor.guard_pending());
    assert_eq!(editor.selection().unwrap().encode(), "doc1");
    assert_eq!(editor.document("doc1").unwrap().name, "Alpha 2");
}

#[test]
fn cancel_navigation_stays_put() {
    let mut editor = loaded_editor();
    editor.select(Some(SelectionPath::root("doc1")));
    editor
        .apply_edit("doc1", |d| d.name = "Alpha 2".to_string())
        .unwrap();
    editor.select(Some(SelectionPath::root("doc2")));
    editor.cancel_navigation();
    assert!(!editor.guard_pending());
    assert_eq!(editor.selection().unwrap().encode(), "doc1");
    assert!(editor.is_modified("doc1"));
}

#[test]
fn discard_reverts_and_applies_the_parked_move() {
    let mut editor = loaded_editor();
    editor.select(Some(SelectionPath::root("doc1")));
    editor
        .apply_edit("doc1", |d| d.name = "Alpha 2".to_string())
        .unwrap();
    editor.select(Some(SelectionPath::root("doc2")));
    editor.discard();
    assert_eq!(editor.document("doc1").unwrap().name, "Alpha");
    assert!(!editor.any_modified());
    assert_eq!(editor.selection().unwrap().encode(), "doc2");
}

#[test]
fn a_parked_move_may_target_nothing() {
    let mut editor = loaded_editor();
    editor.select(Some(SelectionPath::root("doc1")));
    editor
        .apply_edit("doc1", |d| d.name = "Alpha 2".to_string())
        .unwrap();
    assert_eq!(editor.select(None), SelectOutcome::ConfirmationRequired);
    editor.discard();
    assert_eq!(editor.selection(), None);
}

#[test]
fn discard_trims_the_selection_to_what_still_exists() {
    let mut editor = loaded_editor();
    editor.select(Some(SelectionPath::root("doc2")));
    editor.add_organisation().unwrap();
    assert_eq!(
        editor.selection().unwrap().encode(),
        "doc2|_New Organisation 1"
    );
    editor.discard();
    assert_eq!(editor.selection().unwrap().encode(), "doc2");
    assert!(
        editor
            .document("doc2")
            .unwrap()
            .organisation("_New Organisation 1")
            .is_none()
    );
}

#[test]
fn a_fresh_record_is_dirty_until_saved() {
    let mut editor: Editor<ConfigurationDocument> = Editor::default();
    editor.load(Vec::new());
    let path = editor.add_top_level("admin").unwrap();
    assert_eq!(path.encode(), NEW_DOCUMENT_ID);
    let doc = editor.document(NEW_DOCUMENT_ID).unwrap();
    assert_eq!(doc.name, PLACEHOLDER_CONFIGURATION);
    assert!(editor.is_modified(NEW_DOCUMENT_ID));

    // An unsaved record has no stored counterpart, so no sequence of edits
    // can make it clean.
    editor
        .apply_edit(NEW_DOCUMENT_ID, |d| d.name = "East".to_string())
        .unwrap();
    editor
        .apply_edit(NEW_DOCUMENT_ID, |d| d.name = PLACEHOLDER_CONFIGURATION.to_string())
        .unwrap();
    assert!(editor.is_modified(NEW_DOCUMENT_ID));
}

#[test]
fn only_one_unsaved_record_can_exist() {
    let mut editor: Editor<ConfigurationDocument> = Editor::default();
    editor.load(Vec::new());
    editor.add_top_level("admin").unwrap();
    assert!(editor.add_top_level("admin").is_err());
}

#[test]
fn discarding_an_unsaved_record_removes_it() {
    let mut editor = loaded_editor();
    editor.add_top_level("admin").unwrap();
    assert!(editor.document(NEW_DOCUMENT_ID).is_some());
    editor.discard();
    assert!(editor.document(NEW_DOCUMENT_ID).is_none());
    assert_eq!(editor.selection(), None);
    assert!(!editor.any_modified());
}

#[test]
fn a_blocked_save_only_records_findings() {
    let mut editor = loaded_editor();
    editor.select(Some(SelectionPath::root("doc1")));
    editor
        .apply_edit("doc1", |d| d.name = String::new())
        .unwrap();
    let SaveOutcome::Blocked(findings) = editor.save_prepare().unwrap() else {
        panic!("expected a blocked save");
    };
    assert!(!findings.is_empty());
    assert_eq!(editor.errors(), findings.as_slice());
    assert!(editor.is_modified("doc1"));
    assert_eq!(editor.document("doc1").unwrap().name, "");
}

#[test]
fn saving_without_changes_is_allowed() {
    let mut editor = loaded_editor();
    editor.select(Some(SelectionPath::root("doc1")));
    assert!(!editor.current_dirty());
    let SaveOutcome::Ready(plan) = editor.save_prepare().unwrap() else {
        panic!("expected a ready save");
    };
    assert!(!plan.is_new);
    assert_eq!(plan.id, "doc1");
    assert_eq!(plan.request.name, "Alpha");
}

#[test]
fn committing_a_create_follows_the_assigned_id() {
    let mut editor: Editor<ConfigurationDocument> = Editor::default();
    editor.load(Vec::new());
    editor.add_top_level("admin").unwrap();
    editor
        .apply_edit(NEW_DOCUMENT_ID, |d| {
            d.name = "Gamma".to_string();
            d.organisations.push(org(" OrgA "));
        })
        .unwrap();
    editor.select(Some(SelectionPath::root(NEW_DOCUMENT_ID).child(" OrgA ")));

    let SaveOutcome::Ready(plan) = editor.save_prepare().unwrap() else {
        panic!("expected a ready save");
    };
    assert!(plan.is_new);

    // The canonical record comes back with a real id and trimmed names; the
    // selection follows both by position.
    let mut canonical = plan.request.clone();
    canonical.id = "41d2c8a0".to_string();
    canonical.version = 1;
    canonical.organisations[0].organisation_name = "OrgA".to_string();
    editor.save_commit(&plan, canonical);

    assert!(editor.document(NEW_DOCUMENT_ID).is_none());
    assert_eq!(editor.document("41d2c8a0").unwrap().name, "Gamma");
    assert!(!editor.any_modified());
    assert_eq!(editor.selection().unwrap().encode(), "41d2c8a0|OrgA");
}

#[test]
fn a_guard_save_hands_the_parked_target_to_the_caller() {
    let mut editor = loaded_editor();
    editor.select(Some(SelectionPath::root("doc1")));
    editor
        .apply_edit("doc1", |d| d.name = "Alpha 2".to_string())
        .unwrap();
    editor.select(Some(SelectionPath::root("doc2")));

    let SaveOutcome::Ready(plan) = editor.save_prepare().unwrap() else {
        panic!("expected a ready save");
    };
    let mut canonical = plan.request.clone();
    canonical.version += 1;
    editor.save_commit(&plan, canonical);
    assert!(!editor.any_modified());

    let target = editor.take_pending().expect("a parked target");
    assert_eq!(editor.select(target), SelectOutcome::Applied);
    assert_eq!(editor.selection().unwrap().encode(), "doc2");
}

#[test]
fn removing_a_child_moves_the_selection_to_its_parent() {
    let mut editor = loaded_editor();
    editor.select(Some(
        SelectionPath::root("doc1").child("OrgA").child("orga-node-1"),
    ));
    let parent = editor.delete_selected_child().unwrap();
    assert_eq!(parent.encode(), "doc1|OrgA");
    assert!(
        editor
            .document("doc1")
            .unwrap()
            .organisation("OrgA")
            .unwrap()
            .elastic_nodes
            .is_empty()
    );
    assert!(editor.is_modified("doc1"));

    let parent = editor.delete_selected_child().unwrap();
    assert_eq!(parent.encode(), "doc1");
    assert!(editor.document("doc1").unwrap().organisation("OrgA").is_none());
}

#[test]
fn renaming_an_organisation_keeps_it_selected() {
    let mut editor = loaded_editor();
    editor.select(Some(SelectionPath::root("doc1").child("OrgA")));
    editor.edit_field("organisationName", "OrgZ").unwrap();
    assert_eq!(editor.selection().unwrap().encode(), "doc1|OrgZ");
    let doc = editor.document("doc1").unwrap();
    assert!(doc.organisation("OrgZ").is_some());
    assert!(doc.organisation("OrgA").is_none());
}

#[test]
fn editing_a_connection_part_rewrites_the_connection_string() {
    let mut editor = loaded_editor();
    editor.select(Some(SelectionPath::root("doc1").child("OrgA")));
    editor.edit_field("server", "db9.example").unwrap();
    let org = editor
        .document("doc1")
        .unwrap()
        .organisation("OrgA")
        .unwrap();
    assert!(org.connection_string.starts_with("Server=db9.example; "));
    assert!(editor.is_modified("doc1"));
}

#[test]
fn added_children_get_numbered_placeholder_names() {
    let mut editor = loaded_editor();
    editor.select(Some(SelectionPath::root("doc2")));
    let org_path = editor.add_organisation().unwrap();
    assert_eq!(org_path.encode(), "doc2|_New Organisation 1");
    let node_path = editor.add_elastic_node().unwrap();
    assert_eq!(node_path.encode(), "doc2|_New Organisation 1|_New Elastic Node 1");
    assert_eq!(editor.selection(), Some(&node_path));
}

#[test]
fn cluster_membership_edits_check_existing_members() {
    let mut editor: Editor<ClusterDocument> = Editor::default();
    editor.load(vec![cluster("c1", "East")]);
    editor.select(Some(SelectionPath::root("c1")));
    editor.add_member("OrgB").unwrap();
    assert!(editor.add_member("OrgB").is_err());
    editor.remove_member("OrgA").unwrap();
    assert!(editor.remove_member("OrgA").is_err());
    assert_eq!(editor.document("c1").unwrap().organisations, ["OrgB"]);
}

#[test]
fn setting_a_user_api_marks_the_cluster_dirty() {
    let mut editor: Editor<ClusterDocument> = Editor::default();
    editor.load(vec![cluster("c1", "East")]);
    editor.select(Some(SelectionPath::root("c1").child(GROUP_USER_APIS)));
    editor
        .set_user_api("Billing", "https://api.example/billing")
        .unwrap();
    assert!(editor.current_dirty());
    assert_eq!(
        editor.document("c1").unwrap().user_api("Billing"),
        Some("https://api.example/billing")
    );
}
