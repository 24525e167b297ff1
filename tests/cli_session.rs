mod common;

use std::process::{Command, Output};

use common::{ADMIN_TOKEN, ServerGuard};
use tempfile::TempDir;

fn confdesk(home: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_confdesk"))
        .env("CONFDESK_HOME", home.path())
        .args(args)
        .output()
        .expect("run confdesk")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn a_full_cli_session_against_a_live_server() {
    let server = ServerGuard::start();
    let home = TempDir::new().unwrap();

    // Before login every remote command refuses with a hint.
    let out = confdesk(&home, &["whoami"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("no remote configured"));

    // Login verifies the credentials before storing anything.
    let out = confdesk(
        &home,
        &["login", "--url", &format!("{}/", server.base_url), "--token", "wrong"],
    );
    assert!(!out.status.success());
    assert!(stderr(&out).contains("verify the URL and token"));

    let out = confdesk(
        &home,
        &["login", "--url", &format!("{}/", server.base_url), "--token", ADMIN_TOKEN],
    );
    assert!(out.status.success(), "login failed: {}", stderr(&out));
    assert!(stdout(&out).contains("Logged in as dev"));

    // The stored base URL was normalised; whoami works from the stored state.
    let config = std::fs::read_to_string(home.path().join("config.json")).unwrap();
    assert!(config.contains(&server.base_url));
    assert!(!config.contains(ADMIN_TOKEN));
    let out = confdesk(&home, &["whoami"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("user: dev"));
    assert!(stdout(&out).contains("administrator: yes"));

    // Create a document through the API, then list and show it.
    let client = reqwest::blocking::Client::new();
    let resp = client
        .post(format!("{}/configurations", server.base_url))
        .bearer_auth(ADMIN_TOKEN)
        .json(&serde_json::json!({
            "id": "new",
            "configType": "configuration",
            "name": "Alpha",
            "organisations": [{
                "organisationName": "OrgA",
                "connectionString": "Server=db1; Database=main; User ID=svc; Password=pw;",
                "elasticAlias": "orga",
                "elasticNodes": ["node-1"]
            }]
        }))
        .send()
        .unwrap();
    assert_eq!(resp.status(), 200);
    let created: serde_json::Value = resp.json().unwrap();
    let id = created["id"].as_str().unwrap();

    let out = confdesk(&home, &["configurations"]);
    assert!(out.status.success());
    let listing = stdout(&out);
    assert!(listing.contains(id));
    assert!(listing.contains("Alpha"));
    assert!(listing.contains("(1 organisations)"));

    let out = confdesk(&home, &["show", id]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("OrgA"));

    let out = confdesk(&home, &["show", "missing-id"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("no document with id 'missing-id'"));

    // JSON output is machine readable.
    let out = confdesk(&home, &["configurations", "--json"]);
    let docs: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(docs.as_array().unwrap().len(), 1);
    assert_eq!(docs[0]["organisations"][0]["organisationName"], "OrgA");

    // Logout forgets the token; remote commands fail again.
    let out = confdesk(&home, &["logout"]);
    assert!(out.status.success());
    let out = confdesk(&home, &["whoami"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("no remote token stored"));
}
