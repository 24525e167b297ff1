use tempfile::TempDir;

use super::*;

fn open_store() -> (TempDir, ConsoleStore) {
    let dir = TempDir::new().unwrap();
    let store = ConsoleStore::open_at(dir.path().to_path_buf()).unwrap();
    (dir, store)
}

#[test]
fn config_defaults_when_missing_and_round_trips() {
    let (_dir, store) = open_store();
    assert!(store.read_config().unwrap().remote.is_none());

    let cfg = ConsoleConfig {
        version: 1,
        remote: Some(RemoteConfig {
            base_url: "http://127.0.0.1:8080".to_string(),
            token: None,
        }),
    };
    store.write_config(&cfg).unwrap();
    let read = store.read_config().unwrap();
    assert_eq!(read.remote.unwrap().base_url, "http://127.0.0.1:8080");
}

#[test]
fn tokens_are_keyed_by_remote_base_url() {
    let (_dir, store) = open_store();
    let one = RemoteConfig {
        base_url: "http://one.example".to_string(),
        token: None,
    };
    let two = RemoteConfig {
        base_url: "http://two.example".to_string(),
        token: None,
    };
    assert_eq!(store.get_remote_token(&one).unwrap(), None);

    store.set_remote_token(&one, "tok-one").unwrap();
    store.set_remote_token(&two, "tok-two").unwrap();
    assert_eq!(
        store.get_remote_token(&one).unwrap().as_deref(),
        Some("tok-one")
    );

    store.clear_remote_token(&one).unwrap();
    assert_eq!(store.get_remote_token(&one).unwrap(), None);
    assert_eq!(
        store.get_remote_token(&two).unwrap().as_deref(),
        Some("tok-two")
    );
}

#[test]
fn a_token_in_an_old_config_moves_into_state() {
    let (_dir, store) = open_store();
    let legacy = serde_json::json!({
        "version": 1,
        "remote": { "base_url": "http://legacy.example", "token": "legacy-token" }
    });
    std::fs::write(
        store.root().join("config.json"),
        serde_json::to_vec_pretty(&legacy).unwrap(),
    )
    .unwrap();

    let cfg = store.read_config().unwrap();
    let remote = cfg.remote.unwrap();
    assert_eq!(remote.token, None);
    assert_eq!(
        store.get_remote_token(&remote).unwrap().as_deref(),
        Some("legacy-token")
    );

    // The rewritten config no longer carries the token.
    let raw = std::fs::read_to_string(store.root().join("config.json")).unwrap();
    assert!(!raw.contains("legacy-token"));
}

#[test]
fn unsupported_state_versions_are_refused() {
    let (_dir, store) = open_store();
    store
        .write_state(&ConsoleState {
            version: 9,
            ..ConsoleState::default()
        })
        .unwrap();
    let remote = RemoteConfig {
        base_url: "http://one.example".to_string(),
        token: None,
    };
    assert!(store.get_remote_token(&remote).is_err());
    assert!(store.set_remote_token(&remote, "tok").is_err());
}
