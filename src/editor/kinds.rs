//! [`TopLevel`] wiring for the two document flavors.

use super::TopLevel;
use crate::model::clusters::{CLUSTER_TYPE, PLACEHOLDER_CLUSTER};
use crate::model::documents::{CONFIGURATION_TYPE, PLACEHOLDER_CONFIGURATION};
use crate::model::{
    ClusterDocument, ConfigurationDocument, GROUP_ORGANISATIONS, GROUP_USER_APIS, NEW_DOCUMENT_ID,
};
use crate::selection::SelectionPath;
use crate::validate::{ValidationError, validate_cluster, validate_document};

impl TopLevel for ConfigurationDocument {
    const KIND: &'static str = "configuration";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn placeholder(creator: &str, now: &str) -> Self {
        ConfigurationDocument {
            id: NEW_DOCUMENT_ID.to_string(),
            config_type: CONFIGURATION_TYPE.to_string(),
            version: 0,
            name: PLACEHOLDER_CONFIGURATION.to_string(),
            created: now.to_string(),
            last_updated: now.to_string(),
            created_by: creator.to_string(),
            last_updated_by: creator.to_string(),
            organisations: Vec::new(),
        }
    }

    fn validate(&self, siblings: &[Self]) -> Vec<ValidationError> {
        validate_document(self, siblings)
    }

    fn remap_selection(request: &Self, canonical: &Self, path: &SelectionPath) -> SelectionPath {
        let out = SelectionPath::root(canonical.id.clone());
        let Some(org_name) = path.segment(1) else {
            return out;
        };
        let Some(org_idx) = request
            .organisations
            .iter()
            .position(|o| o.organisation_name == org_name)
        else {
            return out;
        };
        let Some(org) = canonical.organisations.get(org_idx) else {
            return out;
        };
        let out = out.child(org.organisation_name.clone());
        let Some(node_name) = path.segment(2) else {
            return out;
        };
        let Some(node_idx) = request.organisations[org_idx]
            .elastic_nodes
            .iter()
            .position(|n| n == node_name)
        else {
            return out;
        };
        match org.elastic_nodes.get(node_idx) {
            Some(node) => out.child(node.clone()),
            None => out,
        }
    }

    fn deepest_resolvable(&self, path: &SelectionPath) -> SelectionPath {
        let out = SelectionPath::root(self.id.clone());
        let Some(org_name) = path.segment(1) else {
            return out;
        };
        let Some(org) = self.organisation(org_name) else {
            return out;
        };
        let out = out.child(org_name.to_string());
        let Some(node_name) = path.segment(2) else {
            return out;
        };
        if org.elastic_nodes.iter().any(|n| n == node_name) {
            return out.child(node_name.to_string());
        }
        out
    }
}

impl TopLevel for ClusterDocument {
    const KIND: &'static str = "cluster";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn placeholder(creator: &str, now: &str) -> Self {
        ClusterDocument {
            id: NEW_DOCUMENT_ID.to_string(),
            config_type: CLUSTER_TYPE.to_string(),
            version: 0,
            name: PLACEHOLDER_CLUSTER.to_string(),
            application: String::new(),
            created: now.to_string(),
            last_updated: now.to_string(),
            created_by: creator.to_string(),
            last_updated_by: creator.to_string(),
            user_apis: Default::default(),
            organisations: Vec::new(),
        }
    }

    fn validate(&self, siblings: &[Self]) -> Vec<ValidationError> {
        validate_cluster(self, siblings)
    }

    fn remap_selection(_request: &Self, canonical: &Self, path: &SelectionPath) -> SelectionPath {
        // Cluster children are the two fixed groups; only the record id can
        // change across a save.
        let out = SelectionPath::root(canonical.id.clone());
        match path.segment(1) {
            Some(group) if group == GROUP_USER_APIS || group == GROUP_ORGANISATIONS => {
                out.child(group.to_string())
            }
            _ => out,
        }
    }

    fn deepest_resolvable(&self, path: &SelectionPath) -> SelectionPath {
        let out = SelectionPath::root(self.id.clone());
        match path.segment(1) {
            Some(group) if group == GROUP_USER_APIS || group == GROUP_ORGANISATIONS => {
                out.child(group.to_string())
            }
            _ => out,
        }
    }
}
