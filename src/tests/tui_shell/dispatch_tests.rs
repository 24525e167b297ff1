use super::*;

#[test]
fn tokenize_groups_quoted_words() {
    assert_eq!(
        tokenize("edit name \"Org Alpha\"").unwrap(),
        ["edit", "name", "Org Alpha"]
    );
    assert_eq!(
        tokenize("add-member 'Org A'").unwrap(),
        ["add-member", "Org A"]
    );
}

#[test]
fn tokenize_handles_escapes_and_empty_quotes() {
    assert_eq!(tokenize(r"a\ b").unwrap(), ["a b"]);
    assert_eq!(tokenize("set password \"\"").unwrap(), ["set", "password", ""]);
}

#[test]
fn tokenize_rejects_malformed_input() {
    assert!(tokenize("\"open").is_err());
    assert!(tokenize("trailing\\").is_err());
}

#[test]
fn unknown_commands_report_an_error() {
    let mut app = App::default();
    app.input.set("bogus");
    app.run_current_input();
    let last = app.log.last().unwrap();
    assert!(matches!(last.kind, EntryKind::Error));
    assert!(last.lines[0].contains("unknown command 'bogus'"));
}

#[test]
fn known_but_unavailable_commands_say_so() {
    // Without a session only login, help, clear, and quit resolve.
    let mut app = App::default();
    app.input.set("save");
    app.run_current_input();
    let last = app.log.last().unwrap();
    assert!(matches!(last.kind, EntryKind::Error));
    assert!(last.lines[0].contains("'save' is not available right now"));
}

#[test]
fn commands_resolve_by_unique_prefix() {
    let mut app = App::default();
    app.input.set("hel");
    app.run_current_input();
    assert!(app.modal.is_some());
}

#[test]
fn slash_input_suggests_matching_commands() {
    let mut app = App::default();
    app.input.set("/he");
    app.recompute_suggestions();
    assert!(app.suggestions.iter().any(|d| d.name == "help"));

    app.input.set("/");
    app.recompute_suggestions();
    let count = app.suggestions.len();
    assert!(count > 0);
    app.move_suggestion(-1);
    assert_eq!(app.suggestion_selected, count - 1);
    app.move_suggestion(1);
    assert_eq!(app.suggestion_selected, 0);
}

#[test]
fn applying_a_suggestion_keeps_typed_arguments() {
    let mut app = App::default();
    app.input.set("/hel topic");
    app.recompute_suggestions();
    app.apply_selected_suggestion();
    assert_eq!(app.input.buf, "help topic");
}
