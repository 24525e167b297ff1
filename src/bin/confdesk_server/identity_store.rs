//! Users and bearer tokens, kept in `users.json` and `tokens.json` under the
//! data directory. Tokens are stored as blake3 hashes, never in the clear.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::persistence::{read_json_or, write_json_pretty};
use crate::types::{AccessToken, Subject, User};

pub(crate) struct IdentityStore {
    users_path: PathBuf,
    tokens_path: PathBuf,
    inner: Mutex<IdentityData>,
}

struct IdentityData {
    users: Vec<User>,
    tokens: Vec<AccessToken>,
}

pub(crate) fn now_ts() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

pub(crate) fn hash_token(token: &str) -> String {
    blake3::hash(token.as_bytes()).to_hex().to_string()
}

fn derived_id(prefix: &str, seed: &str) -> String {
    let hex = blake3::hash(seed.as_bytes()).to_hex();
    format!("{}-{}", prefix, &hex[..12])
}

impl IdentityStore {
    pub(crate) fn open(data_dir: &Path) -> Result<Self> {
        let users_path = data_dir.join("users.json");
        let tokens_path = data_dir.join("tokens.json");
        let users: Vec<User> = read_json_or(&users_path, Vec::new)?;
        let tokens: Vec<AccessToken> = read_json_or(&tokens_path, Vec::new)?;
        Ok(IdentityStore {
            users_path,
            tokens_path,
            inner: Mutex::new(IdentityData { users, tokens }),
        })
    }

    /// Ensure the dev users and their tokens exist. Ids derive from the
    /// handle, so repeated starts against the same data dir reuse records.
    pub(crate) fn bootstrap(
        &self,
        admin: &str,
        admin_token: &str,
        viewer_token: Option<&str>,
    ) -> Result<()> {
        let mut data = self.lock();
        ensure_user(&mut data, admin, true);
        ensure_token(&mut data, admin, admin_token);
        if let Some(token) = viewer_token {
            ensure_user(&mut data, "viewer", false);
            ensure_token(&mut data, "viewer", token);
        }
        self.persist(&data)
    }

    /// Resolve a presented token to its user. `None` means the caller gets a
    /// 401: unknown hash, revoked, expired, or a dangling user id.
    pub(crate) fn authenticate(&self, token: &str) -> Result<Option<Subject>> {
        let hash = hash_token(token);
        let now = now_ts();
        let mut data = self.lock();
        let Some(entry) = data.tokens.iter_mut().find(|t| t.token_hash == hash) else {
            return Ok(None);
        };
        if entry.revoked_at.is_some() {
            return Ok(None);
        }
        if let Some(expires) = &entry.expires_at {
            // RFC3339 UTC strings order lexicographically.
            if expires.as_str() <= now.as_str() {
                return Ok(None);
            }
        }
        entry.last_used_at = Some(now);
        let user_id = entry.user_id.clone();
        let Some(user) = data.users.iter().find(|u| u.id == user_id) else {
            return Ok(None);
        };
        let subject = Subject {
            user: user.handle.clone(),
            display_name: user.display_name.clone(),
            admin: user.admin,
        };
        self.persist(&data)?;
        Ok(Some(subject))
    }

    fn lock(&self) -> MutexGuard<'_, IdentityData> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, data: &IdentityData) -> Result<()> {
        let mut users = data.users.clone();
        users.sort_by(|a, b| a.handle.cmp(&b.handle));
        write_json_pretty(&self.users_path, &users).context("persist users")?;
        let mut tokens = data.tokens.clone();
        tokens.sort_by(|a, b| a.id.cmp(&b.id));
        write_json_pretty(&self.tokens_path, &tokens).context("persist tokens")
    }
}

fn ensure_user(data: &mut IdentityData, handle: &str, admin: bool) {
    if data.users.iter().any(|u| u.handle == handle) {
        return;
    }
    data.users.push(User {
        id: derived_id("user", handle),
        handle: handle.to_string(),
        display_name: None,
        admin,
        created_at: now_ts(),
    });
}

fn ensure_token(data: &mut IdentityData, handle: &str, token: &str) {
    let hash = hash_token(token);
    if data.tokens.iter().any(|t| t.token_hash == hash) {
        return;
    }
    let user_id = data
        .users
        .iter()
        .find(|u| u.handle == handle)
        .map(|u| u.id.clone())
        .unwrap_or_default();
    data.tokens.push(AccessToken {
        id: derived_id("token", &format!("{}\n{}", handle, hash)),
        user_id,
        token_hash: hash,
        label: format!("bootstrap token for {}", handle),
        created_at: now_ts(),
        last_used_at: None,
        revoked_at: None,
        expires_at: None,
    });
}
