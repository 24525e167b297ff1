use anyhow::{Context, Result};

use crate::model::RemoteConfig;

mod http_client;
mod operations;
mod types;
pub use self::types::*;

/// Blocking client for the configuration service. One instance per remote;
/// calls run on the caller's thread, so at most one request is ever in
/// flight from the console.
pub struct RemoteClient {
    remote: RemoteConfig,
    token: String,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(remote: RemoteConfig, token: String) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("confdesk")
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            remote,
            token,
            client,
        })
    }
}
