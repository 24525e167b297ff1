use super::*;

#[test]
fn compose_emits_the_exact_wire_form() {
    let s = compose_connection_string("db1.example", "imanage", "svc", "s3cret");
    assert_eq!(
        s,
        "Server=db1.example; Database=imanage; User ID=svc; Password=s3cret; \
         Trusted_Connection=false; MultipleActiveResultSets=true; \
         Trust Server Certificate=true;"
    );
}

#[test]
fn split_recovers_the_editable_parts() {
    let parts = split_connection_string(&compose_connection_string("s", "d", "u", "p"));
    assert_eq!(
        parts,
        ConnectionParts {
            server: "s".to_string(),
            database: "d".to_string(),
            user_id: "u".to_string(),
            password: "p".to_string(),
        }
    );
}

#[test]
fn split_ignores_ordering_and_unknown_segments() {
    let parts =
        split_connection_string("Database=main;Encrypt=yes;  Server=db9 ;User ID=sa;Password=;");
    assert_eq!(parts.server, "db9");
    assert_eq!(parts.database, "main");
    assert_eq!(parts.user_id, "sa");
    assert_eq!(parts.password, "");
}

#[test]
fn split_of_an_empty_string_yields_empty_parts() {
    assert_eq!(split_connection_string(""), ConnectionParts::default());
}
