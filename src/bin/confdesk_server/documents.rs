//! Document collections and their route handlers. Writes stamp audit fields,
//! bump the version, trim name fields, and reject duplicate names.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use axum::Extension;
use axum::Json;
use axum::extract::{Path as UrlPath, State};
use axum::response::Response;

use confdesk::model::clusters::CLUSTER_TYPE;
use confdesk::model::documents::CONFIGURATION_TYPE;
use confdesk::model::{ClusterDocument, ConfigurationDocument};

use crate::AppState;
use crate::http_error::{bad_request, conflict, forbidden, internal_error, json_bytes, not_found};
use crate::identity_store::now_ts;
use crate::persistence::{read_json_or, write_json_pretty};
use crate::types::Subject;

pub(crate) struct DocumentStore {
    configurations_path: PathBuf,
    clusters_path: PathBuf,
    inner: Mutex<DocumentData>,
}

struct DocumentData {
    configurations: Vec<ConfigurationDocument>,
    clusters: Vec<ClusterDocument>,
}

impl DocumentStore {
    pub(crate) fn open(data_dir: &Path) -> Result<Self> {
        let configurations_path = data_dir.join("configurations.json");
        let clusters_path = data_dir.join("clusters.json");
        let configurations = read_json_or(&configurations_path, Vec::new)?;
        let clusters = read_json_or(&clusters_path, Vec::new)?;
        Ok(DocumentStore {
            configurations_path,
            clusters_path,
            inner: Mutex::new(DocumentData {
                configurations,
                clusters,
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, DocumentData> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist_configurations(&self, data: &DocumentData) -> Result<()> {
        write_json_pretty(&self.configurations_path, &data.configurations)
            .context("persist configurations")
    }

    fn persist_clusters(&self, data: &DocumentData) -> Result<()> {
        write_json_pretty(&self.clusters_path, &data.clusters).context("persist clusters")
    }
}

/// New ids hash the document name, the clock, and fresh randomness down to a
/// short hex string.
fn new_record_id(name: &str) -> Result<String> {
    let mut random = [0u8; 16];
    getrandom::getrandom(&mut random).context("gather randomness")?;
    let mut seed = Vec::new();
    seed.extend_from_slice(name.as_bytes());
    seed.push(b'\n');
    seed.extend_from_slice(now_ts().as_bytes());
    seed.push(b'\n');
    seed.extend_from_slice(&random);
    let hex = blake3::hash(&seed).to_hex();
    Ok(hex[..16].to_string())
}

fn trim_configuration(doc: &mut ConfigurationDocument) {
    doc.name = doc.name.trim().to_string();
    for org in &mut doc.organisations {
        org.organisation_name = org.organisation_name.trim().to_string();
        org.elastic_alias = org.elastic_alias.trim().to_string();
        for node in &mut org.elastic_nodes {
            *node = node.trim().to_string();
        }
    }
}

fn trim_cluster(doc: &mut ClusterDocument) {
    doc.name = doc.name.trim().to_string();
    doc.application = doc.application.trim().to_string();
    for member in &mut doc.organisations {
        *member = member.trim().to_string();
    }
}

pub(crate) async fn list_configurations(State(state): State<AppState>) -> Response {
    let data = state.documents.lock();
    json_bytes(&data.configurations)
}

pub(crate) async fn create_configuration(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Json(mut doc): Json<ConfigurationDocument>,
) -> Response {
    if !subject.admin {
        return forbidden("administrator capability required");
    }
    if !doc.config_type.is_empty() && doc.config_type != CONFIGURATION_TYPE {
        return bad_request("configType must be 'configuration'");
    }
    trim_configuration(&mut doc);
    if doc.name.is_empty() {
        return bad_request("name is required");
    }

    let mut data = state.documents.lock();
    let name_key = doc.name.to_lowercase();
    if data
        .configurations
        .iter()
        .any(|d| d.name.to_lowercase() == name_key)
    {
        return conflict("a configuration with that name already exists");
    }
    doc.id = match new_record_id(&doc.name) {
        Ok(id) => id,
        Err(err) => return internal_error(&format!("{:#}", err)),
    };
    doc.config_type = CONFIGURATION_TYPE.to_string();
    doc.version = 1;
    let now = now_ts();
    doc.created = now.clone();
    doc.created_by = subject.user.clone();
    doc.last_updated = now;
    doc.last_updated_by = subject.user;

    data.configurations.push(doc.clone());
    data.configurations
        .sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    if let Err(err) = state.documents.persist_configurations(&data) {
        return internal_error(&format!("{:#}", err));
    }
    json_bytes(&doc)
}

pub(crate) async fn update_configuration(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    UrlPath(id): UrlPath<String>,
    Json(mut doc): Json<ConfigurationDocument>,
) -> Response {
    if !subject.admin {
        return forbidden("administrator capability required");
    }
    if !doc.config_type.is_empty() && doc.config_type != CONFIGURATION_TYPE {
        return bad_request("configType must be 'configuration'");
    }
    trim_configuration(&mut doc);
    if doc.name.is_empty() {
        return bad_request("name is required");
    }

    let mut data = state.documents.lock();
    let Some(idx) = data.configurations.iter().position(|d| d.id == id) else {
        return not_found(&format!("configuration {} does not exist", id));
    };
    let name_key = doc.name.to_lowercase();
    if data
        .configurations
        .iter()
        .any(|d| d.id != id && d.name.to_lowercase() == name_key)
    {
        return conflict("a configuration with that name already exists");
    }
    let existing = &data.configurations[idx];
    doc.id = existing.id.clone();
    doc.config_type = CONFIGURATION_TYPE.to_string();
    doc.version = existing.version + 1;
    doc.created = existing.created.clone();
    doc.created_by = existing.created_by.clone();
    doc.last_updated = now_ts();
    doc.last_updated_by = subject.user;

    data.configurations[idx] = doc.clone();
    data.configurations
        .sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    if let Err(err) = state.documents.persist_configurations(&data) {
        return internal_error(&format!("{:#}", err));
    }
    json_bytes(&doc)
}

pub(crate) async fn list_clusters(State(state): State<AppState>) -> Response {
    let data = state.documents.lock();
    json_bytes(&data.clusters)
}

pub(crate) async fn create_cluster(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    Json(mut doc): Json<ClusterDocument>,
) -> Response {
    if !subject.admin {
        return forbidden("administrator capability required");
    }
    if !doc.config_type.is_empty() && doc.config_type != CLUSTER_TYPE {
        return bad_request("configType must be 'cluster'");
    }
    trim_cluster(&mut doc);
    if doc.name.is_empty() {
        return bad_request("name is required");
    }

    let mut data = state.documents.lock();
    let name_key = doc.name.to_lowercase();
    if data.clusters.iter().any(|d| d.name.to_lowercase() == name_key) {
        return conflict("a cluster with that name already exists");
    }
    doc.id = match new_record_id(&doc.name) {
        Ok(id) => id,
        Err(err) => return internal_error(&format!("{:#}", err)),
    };
    doc.config_type = CLUSTER_TYPE.to_string();
    doc.version = 1;
    let now = now_ts();
    doc.created = now.clone();
    doc.created_by = subject.user.clone();
    doc.last_updated = now;
    doc.last_updated_by = subject.user;

    data.clusters.push(doc.clone());
    data.clusters
        .sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    if let Err(err) = state.documents.persist_clusters(&data) {
        return internal_error(&format!("{:#}", err));
    }
    json_bytes(&doc)
}

pub(crate) async fn update_cluster(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    UrlPath(id): UrlPath<String>,
    Json(mut doc): Json<ClusterDocument>,
) -> Response {
    if !subject.admin {
        return forbidden("administrator capability required");
    }
    if !doc.config_type.is_empty() && doc.config_type != CLUSTER_TYPE {
        return bad_request("configType must be 'cluster'");
    }
    trim_cluster(&mut doc);
    if doc.name.is_empty() {
        return bad_request("name is required");
    }

    let mut data = state.documents.lock();
    let Some(idx) = data.clusters.iter().position(|d| d.id == id) else {
        return not_found(&format!("cluster {} does not exist", id));
    };
    let name_key = doc.name.to_lowercase();
    if data
        .clusters
        .iter()
        .any(|d| d.id != id && d.name.to_lowercase() == name_key)
    {
        return conflict("a cluster with that name already exists");
    }
    let existing = &data.clusters[idx];
    doc.id = existing.id.clone();
    doc.config_type = CLUSTER_TYPE.to_string();
    doc.version = existing.version + 1;
    doc.created = existing.created.clone();
    doc.created_by = existing.created_by.clone();
    doc.last_updated = now_ts();
    doc.last_updated_by = subject.user;

    data.clusters[idx] = doc.clone();
    data.clusters
        .sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    if let Err(err) = state.documents.persist_clusters(&data) {
        return internal_error(&format!("{:#}", err));
    }
    json_bytes(&doc)
}
