//! Flavor-specific edit operations layered over the generic editor core.
//! These resolve the current selection to a node, mutate through
//! [`Editor::apply_edit`] so dirty tracking stays correct, and keep the
//! selection pointing at renamed or newly added nodes.

use anyhow::Result;

use super::Editor;
use crate::model::documents::{PLACEHOLDER_ELASTIC_NODE, PLACEHOLDER_ORGANISATION};
use crate::model::{ClusterDocument, ConfigurationDocument, Organisation, next_placeholder_name};
use crate::selection::SelectionPath;

impl Editor<ConfigurationDocument> {
    /// Appends a placeholder organisation to the selected configuration and
    /// selects it.
    pub fn add_organisation(&mut self) -> Result<SelectionPath> {
        let Some(path) = self.selection.clone() else {
            anyhow::bail!("select a configuration first");
        };
        let id = path.top_level().to_string();
        let Some(doc) = self.document(&id) else {
            anyhow::bail!("no configuration with id {}", id);
        };
        let name = next_placeholder_name(
            PLACEHOLDER_ORGANISATION,
            doc.organisations.iter().map(|o| o.organisation_name.as_str()),
        );
        let org = Organisation::named(name.clone());
        self.apply_edit(&id, |doc| doc.organisations.push(org))?;
        let target = SelectionPath::root(id).child(name);
        self.selection = Some(target.clone());
        Ok(target)
    }

    /// Appends a placeholder elastic node to the selected organisation and
    /// selects it.
    pub fn add_elastic_node(&mut self) -> Result<SelectionPath> {
        let Some(path) = self.selection.clone() else {
            anyhow::bail!("select an organisation first");
        };
        let Some(org_name) = path.segment(1) else {
            anyhow::bail!("select an organisation first");
        };
        let id = path.top_level().to_string();
        let org_name = org_name.to_string();
        let Some(org) = self.document(&id).and_then(|d| d.organisation(&org_name)) else {
            anyhow::bail!("no organisation named {} in this configuration", org_name);
        };
        let name = next_placeholder_name(
            PLACEHOLDER_ELASTIC_NODE,
            org.elastic_nodes.iter().map(String::as_str),
        );
        let node = name.clone();
        let org_key = org_name.clone();
        self.apply_edit(&id, |doc| {
            if let Some(org) = doc.organisation_mut(&org_key) {
                org.elastic_nodes.push(node);
            }
        })?;
        let target = SelectionPath::root(id).child(org_name).child(name);
        self.selection = Some(target.clone());
        Ok(target)
    }

    /// Removes the selected organisation or elastic node and moves the
    /// selection to its parent. Top-level records are never deleted here.
    pub fn delete_selected_child(&mut self) -> Result<SelectionPath> {
        let Some(path) = self.selection.clone() else {
            anyhow::bail!("nothing is selected");
        };
        let id = path.top_level().to_string();
        match (path.depth(), path.segment(1), path.segment(2)) {
            (3, Some(org_name), Some(node_name)) => {
                let org_key = org_name.to_string();
                let node_key = node_name.to_string();
                self.apply_edit(&id, |doc| {
                    if let Some(org) = doc.organisation_mut(&org_key) {
                        org.elastic_nodes.retain(|n| n != &node_key);
                    }
                })?;
                let parent = SelectionPath::root(id).child(org_name.to_string());
                self.selection = Some(parent.clone());
                Ok(parent)
            }
            (2, Some(org_name), _) => {
                let org_key = org_name.to_string();
                self.apply_edit(&id, |doc| {
                    doc.organisations
                        .retain(|o| o.organisation_name != org_key);
                })?;
                let parent = SelectionPath::root(id);
                self.selection = Some(parent.clone());
                Ok(parent)
            }
            _ => anyhow::bail!("select an organisation or elastic node to remove"),
        }
    }

    /// Applies a single-field edit to the selected node. Renames keep the
    /// selection on the renamed node.
    pub fn edit_field(&mut self, field: &str, value: &str) -> Result<()> {
        let Some(path) = self.selection.clone() else {
            anyhow::bail!("nothing is selected");
        };
        let id = path.top_level().to_string();
        match path.depth() {
            1 => match field {
                "name" => {
                    let v = value.to_string();
                    self.apply_edit(&id, |doc| doc.name = v)
                }
                _ => anyhow::bail!("configuration fields: name"),
            },
            2 => {
                let Some(org_name) = path.segment(1).map(str::to_string) else {
                    anyhow::bail!("nothing is selected");
                };
                if self
                    .document(&id)
                    .and_then(|d| d.organisation(&org_name))
                    .is_none()
                {
                    anyhow::bail!("no organisation named {} in this configuration", org_name);
                }
                let v = value.to_string();
                let org_key = org_name.clone();
                match field {
                    "organisationName" => {
                        self.apply_edit(&id, |doc| {
                            if let Some(org) = doc.organisation_mut(&org_key) {
                                org.organisation_name = v;
                            }
                        })?;
                        self.selection =
                            Some(SelectionPath::root(id).child(value.to_string()));
                        Ok(())
                    }
                    "server" => self.apply_edit(&id, |doc| {
                        if let Some(org) = doc.organisation_mut(&org_key) {
                            org.server = v;
                            org.recompose_connection_string();
                        }
                    }),
                    "database" => self.apply_edit(&id, |doc| {
                        if let Some(org) = doc.organisation_mut(&org_key) {
                            org.database = v;
                            org.recompose_connection_string();
                        }
                    }),
                    "userId" => self.apply_edit(&id, |doc| {
                        if let Some(org) = doc.organisation_mut(&org_key) {
                            org.user_id = v;
                            org.recompose_connection_string();
                        }
                    }),
                    "password" => self.apply_edit(&id, |doc| {
                        if let Some(org) = doc.organisation_mut(&org_key) {
                            org.password = v;
                            org.recompose_connection_string();
                        }
                    }),
                    "elasticAlias" => self.apply_edit(&id, |doc| {
                        if let Some(org) = doc.organisation_mut(&org_key) {
                            org.elastic_alias = v;
                        }
                    }),
                    _ => anyhow::bail!(
                        "organisation fields: organisationName, server, database, userId, password, elasticAlias"
                    ),
                }
            }
            _ => {
                let (Some(org_name), Some(node_name)) = (path.segment(1), path.segment(2)) else {
                    anyhow::bail!("nothing is selected");
                };
                if field != "name" {
                    anyhow::bail!("elastic node fields: name");
                }
                let org_key = org_name.to_string();
                let node_key = node_name.to_string();
                let v = value.to_string();
                self.apply_edit(&id, |doc| {
                    if let Some(org) = doc.organisation_mut(&org_key) {
                        if let Some(node) = org.elastic_nodes.iter_mut().find(|n| **n == node_key) {
                            *node = v;
                        }
                    }
                })?;
                self.selection = Some(
                    SelectionPath::root(id)
                        .child(org_name.to_string())
                        .child(value.to_string()),
                );
                Ok(())
            }
        }
    }
}

impl Editor<ClusterDocument> {
    fn selected_cluster_id(&self) -> Result<String> {
        let Some(path) = self.selection.as_ref() else {
            anyhow::bail!("select a cluster first");
        };
        Ok(path.top_level().to_string())
    }

    /// Applies a single-field edit to the selected cluster record.
    pub fn edit_field(&mut self, field: &str, value: &str) -> Result<()> {
        let id = self.selected_cluster_id()?;
        let v = value.to_string();
        match field {
            "name" => self.apply_edit(&id, |c| c.name = v),
            "application" => self.apply_edit(&id, |c| c.application = v),
            _ => anyhow::bail!("cluster fields: name, application"),
        }
    }

    /// Sets one user API URL on the selected cluster.
    pub fn set_user_api(&mut self, api: &str, url: &str) -> Result<()> {
        let id = self.selected_cluster_id()?;
        let api = api.to_string();
        let url = url.to_string();
        self.apply_edit(&id, |c| {
            c.user_apis.insert(api, url);
        })
    }

    /// Adds a member organisation to the selected cluster.
    pub fn add_member(&mut self, name: &str) -> Result<()> {
        let id = self.selected_cluster_id()?;
        let name = name.trim();
        if name.is_empty() {
            anyhow::bail!("member name must not be empty");
        }
        let Some(cluster) = self.document(&id) else {
            anyhow::bail!("no cluster with id {}", id);
        };
        if cluster.has_member(name) {
            anyhow::bail!("{} is already a member of this cluster", name);
        }
        let member = name.to_string();
        self.apply_edit(&id, |c| c.organisations.push(member))
    }

    /// Removes a member organisation from the selected cluster.
    pub fn remove_member(&mut self, name: &str) -> Result<()> {
        let id = self.selected_cluster_id()?;
        let name = name.trim();
        let Some(cluster) = self.document(&id) else {
            anyhow::bail!("no cluster with id {}", id);
        };
        if !cluster.has_member(name) {
            anyhow::bail!("{} is not a member of this cluster", name);
        }
        let member = name.to_string();
        self.apply_edit(&id, |c| c.organisations.retain(|m| m != &member))
    }
}
