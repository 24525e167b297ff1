mod common;

use common::{ADMIN_TOKEN, ServerGuard, VIEWER_TOKEN};
use confdesk::model::{ClusterDocument, ConfigurationDocument, Organisation, RemoteConfig};
use confdesk::remote::RemoteClient;

fn client(server: &ServerGuard, token: &str) -> RemoteClient {
    let remote = RemoteConfig {
        base_url: server.base_url.clone(),
        token: None,
    };
    RemoteClient::new(remote, token.to_string()).expect("build client")
}

fn configuration(name: &str) -> ConfigurationDocument {
    let mut org = Organisation::named("OrgA");
    org.server = "db1".to_string();
    org.database = "main".to_string();
    org.user_id = "svc".to_string();
    org.password = "pw".to_string();
    org.recompose_connection_string();
    org.elastic_alias = "orga".to_string();
    org.elastic_nodes = vec!["node-1".to_string()];
    ConfigurationDocument {
        id: "new".to_string(),
        config_type: "configuration".to_string(),
        version: 0,
        name: name.to_string(),
        created: String::new(),
        last_updated: String::new(),
        created_by: String::new(),
        last_updated_by: String::new(),
        organisations: vec![org],
    }
}

#[test]
fn configuration_documents_round_trip_hydrated() {
    let server = ServerGuard::start();
    let admin = client(&server, ADMIN_TOKEN);

    let who = admin.whoami().unwrap();
    assert_eq!(who.user, "dev");
    assert!(who.administrator);

    let created = admin.create_configuration(&configuration("Alpha")).unwrap();
    assert_ne!(created.id, "new");
    assert_eq!(created.version, 1);
    // The client hydrates the split connection fields after every fetch.
    assert_eq!(created.organisations[0].server, "db1");
    assert_eq!(created.organisations[0].password, "pw");

    let mut fetched = admin.fetch_configurations().unwrap();
    assert_eq!(fetched.len(), 1);
    let mut doc = fetched.remove(0);
    assert_eq!(doc.organisations[0].database, "main");

    doc.organisations[0].database = "archive".to_string();
    doc.organisations[0].recompose_connection_string();
    let updated = admin.update_configuration(&doc).unwrap();
    assert_eq!(updated.version, 2);
    assert_eq!(updated.organisations[0].database, "archive");
}

#[test]
fn auth_failures_surface_as_errors() {
    let server = ServerGuard::start();

    let stranger = client(&server, "wrong-token");
    let err = stranger.fetch_configurations().unwrap_err();
    assert!(format!("{:#}", err).contains("unauthorized"));

    let viewer = client(&server, VIEWER_TOKEN);
    assert!(viewer.fetch_configurations().unwrap().is_empty());
    let err = viewer.create_configuration(&configuration("Nope")).unwrap_err();
    assert!(format!("{:#}", err).contains("forbidden"));
}

#[test]
fn cluster_documents_round_trip() {
    let server = ServerGuard::start();
    let admin = client(&server, ADMIN_TOKEN);

    let mut cluster: ClusterDocument = serde_json::from_value(serde_json::json!({
        "id": "new",
        "configType": "cluster",
        "name": "East",
        "application": "imanage",
        "userApis": {
            "iManage": "https://api.example/imanage",
            "Settings": "https://api.example/settings",
            "Lookups": "https://api.example/lookups"
        },
        "organisations": ["OrgA"]
    }))
    .unwrap();

    let created = admin.create_cluster(&cluster).unwrap();
    assert_eq!(created.version, 1);
    assert!(created.has_member("OrgA"));

    cluster = created;
    cluster.organisations.push("OrgB".to_string());
    let updated = admin.update_cluster(&cluster).unwrap();
    assert_eq!(updated.version, 2);
    assert!(updated.has_member("OrgB"));

    let listed = admin.fetch_clusters().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(
        listed[0].user_api("Settings"),
        Some("https://api.example/settings")
    );
}
