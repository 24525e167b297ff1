use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `configType` discriminator carried by cluster documents.
pub const CLUSTER_TYPE: &str = "cluster";

pub const PLACEHOLDER_CLUSTER: &str = "_New Cluster";

/// The user API entries every cluster must define.
pub const REQUIRED_USER_APIS: &[&str] = &["iManage", "Settings", "Lookups"];

/// Fixed child-group labels used in cluster selection paths.
pub const GROUP_USER_APIS: &str = "user-apis";
pub const GROUP_ORGANISATIONS: &str = "organisations";

/// A cluster document: a named application deployment with its user-facing
/// API endpoints and the organisations that are members of it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDocument {
    pub id: String,
    pub config_type: String,
    #[serde(default)]
    pub version: u64,
    pub name: String,
    #[serde(default)]
    pub application: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub last_updated_by: String,
    #[serde(default)]
    pub user_apis: BTreeMap<String, String>,
    #[serde(default)]
    pub organisations: Vec<String>,
}

impl ClusterDocument {
    pub fn user_api(&self, api: &str) -> Option<&str> {
        self.user_apis.get(api).map(String::as_str)
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.organisations.iter().any(|m| m == name)
    }
}
