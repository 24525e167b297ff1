use serde_json::json;

use super::*;

#[test]
fn either_side_absent_is_a_difference() {
    let v = json!({ "a": 1 });
    assert!(!objects_equal(None, Some(&v), &[]));
    assert!(!objects_equal(Some(&v), None, &[]));
    assert!(!objects_equal(None, None, &[]));
}

#[test]
fn equal_objects_compare_equal() {
    let a = json!({ "name": "alpha", "organisations": [{ "organisationName": "OrgA" }] });
    let b = a.clone();
    assert!(objects_equal(Some(&a), Some(&b), &[]));
}

#[test]
fn ignored_keys_are_skipped_at_every_depth() {
    let a = json!({
        "name": "alpha",
        "created": "2024-01-01T00:00:00Z",
        "organisations": [{ "organisationName": "OrgA", "lastUpdated": "then" }]
    });
    let b = json!({
        "name": "alpha",
        "created": "2026-06-30T00:00:00Z",
        "organisations": [{ "organisationName": "OrgA" }]
    });
    assert!(objects_equal(Some(&a), Some(&b), &["created", "lastUpdated"]));
    assert!(!objects_equal(Some(&a), Some(&b), &[]));
}

#[test]
fn a_missing_key_is_a_difference() {
    let a = json!({ "name": "alpha", "version": 1 });
    let b = json!({ "name": "alpha" });
    assert!(!objects_equal(Some(&a), Some(&b), &[]));
    assert!(!objects_equal(Some(&b), Some(&a), &[]));
}

#[test]
fn array_order_is_significant() {
    let a = json!({ "nodes": ["n1", "n2"] });
    let b = json!({ "nodes": ["n2", "n1"] });
    assert!(!objects_equal(Some(&a), Some(&b), &[]));
}

#[test]
fn scalar_type_changes_are_differences() {
    let a = json!({ "version": 1 });
    let b = json!({ "version": "1" });
    assert!(!objects_equal(Some(&a), Some(&b), &[]));
}
