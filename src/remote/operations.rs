//! Configuration and cluster document operations against the service.

use super::*;
use crate::model::{ClusterDocument, ConfigurationDocument};

impl RemoteClient {
    pub fn whoami(&self) -> Result<WhoAmI> {
        let resp = self
            .client
            .get(self.url("/whoami"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .send()
            .context("whoami")?;
        let w: WhoAmI = self
            .ensure_ok(resp, "whoami")?
            .json()
            .context("parse whoami")?;
        Ok(w)
    }

    pub fn fetch_configurations(&self) -> Result<Vec<ConfigurationDocument>> {
        let resp = self
            .client
            .get(self.url("/configurations"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .send()
            .context("list configurations")?;
        let mut docs: Vec<ConfigurationDocument> = self
            .ensure_ok(resp, "list configurations")?
            .json()
            .context("parse configurations")?;
        for doc in &mut docs {
            doc.hydrate_connection_fields();
        }
        Ok(docs)
    }

    pub fn create_configuration(
        &self,
        doc: &ConfigurationDocument,
    ) -> Result<ConfigurationDocument> {
        let resp = self
            .client
            .post(self.url("/configurations"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(doc)
            .send()
            .context("create configuration")?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            anyhow::bail!(
                "configuration endpoint not found (is confdesk-server running at {}?)",
                self.remote.base_url
            );
        }
        let mut created: ConfigurationDocument = self
            .ensure_ok(resp, "create configuration")?
            .json()
            .context("parse created configuration")?;
        created.hydrate_connection_fields();
        Ok(created)
    }

    pub fn update_configuration(
        &self,
        doc: &ConfigurationDocument,
    ) -> Result<ConfigurationDocument> {
        let resp = self
            .client
            .put(self.url(&format!("/configurations/{}", doc.id)))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(doc)
            .send()
            .context("update configuration")?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            anyhow::bail!("configuration {} does not exist on the server", doc.id);
        }
        let mut updated: ConfigurationDocument = self
            .ensure_ok(resp, "update configuration")?
            .json()
            .context("parse updated configuration")?;
        updated.hydrate_connection_fields();
        Ok(updated)
    }

    pub fn fetch_clusters(&self) -> Result<Vec<ClusterDocument>> {
        let resp = self
            .client
            .get(self.url("/clusters"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .send()
            .context("list clusters")?;
        let clusters: Vec<ClusterDocument> = self
            .ensure_ok(resp, "list clusters")?
            .json()
            .context("parse clusters")?;
        Ok(clusters)
    }

    pub fn create_cluster(&self, cluster: &ClusterDocument) -> Result<ClusterDocument> {
        let resp = self
            .client
            .post(self.url("/clusters"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(cluster)
            .send()
            .context("create cluster")?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            anyhow::bail!(
                "cluster endpoint not found (is confdesk-server running at {}?)",
                self.remote.base_url
            );
        }
        let created: ClusterDocument = self
            .ensure_ok(resp, "create cluster")?
            .json()
            .context("parse created cluster")?;
        Ok(created)
    }

    pub fn update_cluster(&self, cluster: &ClusterDocument) -> Result<ClusterDocument> {
        let resp = self
            .client
            .put(self.url(&format!("/clusters/{}", cluster.id)))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(cluster)
            .send()
            .context("update cluster")?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            anyhow::bail!("cluster {} does not exist on the server", cluster.id);
        }
        let updated: ClusterDocument = self
            .ensure_ok(resp, "update cluster")?
            .json()
            .context("parse updated cluster")?;
        Ok(updated)
    }
}
