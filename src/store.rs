//! On-disk console settings under `~/.confdesk` (or `$CONFDESK_HOME`):
//! `config.json` holds the remote endpoint, `state.json` the bearer tokens
//! keyed by remote base URL.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::{ConsoleConfig, ConsoleState, RemoteConfig};

const STORE_DIR: &str = ".confdesk";
const HOME_ENV: &str = "CONFDESK_HOME";

#[derive(Clone)]
pub struct ConsoleStore {
    root: PathBuf,
}

impl ConsoleStore {
    /// Resolves the settings directory: `$CONFDESK_HOME` when set, otherwise
    /// `.confdesk` under the user's home directory.
    pub fn default_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(HOME_ENV) {
            if !dir.trim().is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }
        let home = std::env::var("HOME")
            .context("HOME is not set (set CONFDESK_HOME to choose a settings directory)")?;
        Ok(Path::new(&home).join(STORE_DIR))
    }

    /// Opens the default settings directory, creating it on first use.
    pub fn open_default() -> Result<Self> {
        Self::open_at(Self::default_dir()?)
    }

    pub fn open_at(root: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root)
            .with_context(|| format!("create settings dir {}", root.display()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn read_config(&self) -> Result<ConsoleConfig> {
        let path = self.root.join("config.json");
        if !path.exists() {
            return Ok(ConsoleConfig::default());
        }
        let bytes = fs::read(&path).context("read config.json")?;
        let mut cfg: ConsoleConfig = serde_json::from_slice(&bytes).context("parse config.json")?;

        // Migration: if an older config contains a token, move it into state.json.
        if let Some(remote) = cfg.remote.as_mut()
            && let Some(token) = remote.token.take()
        {
            self.set_remote_token(remote, &token)
                .context("migrate remote token to state")?;
            // Persist updated config without token.
            self.write_config(&cfg)
                .context("write config after token migration")?;
        }

        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &ConsoleConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.root.join("config.json"), &bytes).context("write config.json")?;
        Ok(())
    }

    pub fn read_state(&self) -> Result<ConsoleState> {
        let path = self.root.join("state.json");
        if !path.exists() {
            return Ok(ConsoleState {
                version: 1,
                ..ConsoleState::default()
            });
        }
        let bytes = fs::read(&path).context("read state.json")?;
        let st: ConsoleState = serde_json::from_slice(&bytes).context("parse state.json")?;
        Ok(st)
    }

    pub fn write_state(&self, st: &ConsoleState) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(st).context("serialize state")?;
        write_atomic(&self.root.join("state.json"), &bytes).context("write state.json")?;
        Ok(())
    }

    pub fn get_remote_token(&self, remote: &RemoteConfig) -> Result<Option<String>> {
        let st = self.read_state()?;
        if st.version != 1 {
            anyhow::bail!("unsupported console state version {}", st.version);
        }
        Ok(st.remote_tokens.get(&remote.base_url).cloned())
    }

    pub fn set_remote_token(&self, remote: &RemoteConfig, token: &str) -> Result<()> {
        let mut st = self.read_state()?;
        if st.version != 1 {
            anyhow::bail!("unsupported console state version {}", st.version);
        }
        st.remote_tokens
            .insert(remote.base_url.clone(), token.to_string());
        self.write_state(&st)
    }

    pub fn clear_remote_token(&self, remote: &RemoteConfig) -> Result<()> {
        let mut st = self.read_state()?;
        if st.version != 1 {
            anyhow::bail!("unsupported console state version {}", st.version);
        }
        st.remote_tokens.remove(&remote.base_url);
        self.write_state(&st)
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
