use serde::{Deserialize, Serialize};

use super::connection::{compose_connection_string, split_connection_string};

/// `configType` discriminator carried by configuration documents.
pub const CONFIGURATION_TYPE: &str = "configuration";

pub const PLACEHOLDER_CONFIGURATION: &str = "_New Configuration";
pub const PLACEHOLDER_ORGANISATION: &str = "_New Organisation";
pub const PLACEHOLDER_ELASTIC_NODE: &str = "_New Elastic Node";

/// A configuration document: one named record holding the organisations it
/// configures. Serialises to the camelCase wire shape used by the service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationDocument {
    pub id: String,
    pub config_type: String,
    #[serde(default)]
    pub version: u64,
    pub name: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub last_updated_by: String,
    #[serde(default)]
    pub organisations: Vec<Organisation>,
}

impl ConfigurationDocument {
    pub fn organisation(&self, name: &str) -> Option<&Organisation> {
        self.organisations
            .iter()
            .find(|o| o.organisation_name == name)
    }

    pub fn organisation_mut(&mut self, name: &str) -> Option<&mut Organisation> {
        self.organisations
            .iter_mut()
            .find(|o| o.organisation_name == name)
    }

    /// Populates the split connection fields of every organisation from the
    /// stored connection strings. Called once after parsing a wire payload.
    pub fn hydrate_connection_fields(&mut self) {
        for org in &mut self.organisations {
            org.hydrate_connection_fields();
        }
    }
}

/// One organisation inside a configuration document. Only `connectionString`
/// crosses the wire; the split database fields are a client-side view of it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organisation {
    pub organisation_name: String,
    #[serde(default)]
    pub connection_string: String,
    #[serde(default)]
    pub elastic_alias: String,
    #[serde(default)]
    pub elastic_nodes: Vec<String>,

    #[serde(skip)]
    pub server: String,
    #[serde(skip)]
    pub database: String,
    #[serde(skip)]
    pub user_id: String,
    #[serde(skip)]
    pub password: String,
}

impl Organisation {
    pub fn named(name: impl Into<String>) -> Organisation {
        Organisation {
            organisation_name: name.into(),
            ..Organisation::default()
        }
    }

    pub fn hydrate_connection_fields(&mut self) {
        let parts = split_connection_string(&self.connection_string);
        self.server = parts.server;
        self.database = parts.database;
        self.user_id = parts.user_id;
        self.password = parts.password;
    }

    /// Re-renders `connectionString` from the split fields. Must run after
    /// any of the four parts changes, so dirty tracking sees the edit.
    pub fn recompose_connection_string(&mut self) {
        self.connection_string = compose_connection_string(
            &self.server,
            &self.database,
            &self.user_id,
            &self.password,
        );
    }
}
