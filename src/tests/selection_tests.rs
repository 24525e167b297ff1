use super::*;

#[test]
fn parse_splits_on_pipes() {
    let path = SelectionPath::parse("doc1|OrgA|node-1").unwrap();
    assert_eq!(path.depth(), 3);
    assert_eq!(path.top_level(), "doc1");
    assert_eq!(path.segment(1), Some("OrgA"));
    assert_eq!(path.segment(2), Some("node-1"));
    assert_eq!(path.segment(3), None);
    assert_eq!(path.encode(), "doc1|OrgA|node-1");
}

#[test]
fn blank_input_and_blank_segments_parse_to_none() {
    assert_eq!(SelectionPath::parse(""), None);
    assert_eq!(SelectionPath::parse("   "), None);
    assert_eq!(SelectionPath::parse("doc1||node-1"), None);
}

#[test]
fn parent_walks_up_one_level() {
    let path = SelectionPath::root("doc1").child("OrgA").child("n1");
    assert_eq!(path.parent().unwrap().encode(), "doc1|OrgA");
    assert_eq!(SelectionPath::root("doc1").parent(), None);
}

#[test]
fn with_top_level_rebases_the_path() {
    let path = SelectionPath::root("new").child("OrgA");
    assert_eq!(path.with_top_level("41d2c8a0").encode(), "41d2c8a0|OrgA");
}

#[test]
fn top_level_changes_only_across_records() {
    let root = SelectionPath::root("a");
    let deeper = SelectionPath::root("a").child("OrgA");
    let other = SelectionPath::root("b");
    assert!(!changed_top_level(Some(&root), Some(&deeper)));
    assert!(!changed_top_level(Some(&deeper), Some(&root)));
    assert!(changed_top_level(Some(&root), Some(&other)));
    assert!(changed_top_level(Some(&root), None));
    assert!(changed_top_level(None, Some(&root)));
    assert!(!changed_top_level(None, None));
}
