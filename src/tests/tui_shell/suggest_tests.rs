use super::*;

fn def(name: &'static str) -> CommandDef {
    CommandDef {
        name,
        aliases: &[],
        usage: name,
        help: "",
    }
}

#[test]
fn exact_beats_prefix_beats_substring() {
    assert_eq!(score_match("save", "save"), Some(100));
    let prefix = score_match("save", "sa").unwrap();
    let substring = score_match("whoami", "a").unwrap();
    assert!(prefix > substring);
    assert_eq!(score_match("filter", "x"), None);
}

#[test]
fn shorter_names_win_among_prefix_matches() {
    assert!(score_match("set", "s").unwrap() > score_match("save", "s").unwrap());
}

#[test]
fn hinted_commands_outrank_higher_scores() {
    let mut scored = vec![(48, def("save")), (10, def("refresh")), (47, def("set"))];
    sort_scored_suggestions(&mut scored, &["refresh".to_string()]);
    let names: Vec<&str> = scored.iter().map(|(_, d)| d.name).collect();
    assert_eq!(names, ["refresh", "save", "set"]);
}

#[test]
fn hint_order_is_preserved() {
    let mut scored = vec![(0, def("add")), (0, def("save")), (0, def("discard"))];
    sort_scored_suggestions(&mut scored, &["save".to_string(), "discard".to_string()]);
    let names: Vec<&str> = scored.iter().map(|(_, d)| d.name).collect();
    assert_eq!(names, ["save", "discard", "add"]);
}

#[test]
fn score_ties_order_by_name() {
    let mut scored = vec![(10, def("logout")), (10, def("login"))];
    sort_scored_suggestions(&mut scored, &[]);
    assert_eq!(scored[0].1.name, "login");
}
