use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct User {
    pub(crate) id: String,
    pub(crate) handle: String,
    #[serde(default)]
    pub(crate) display_name: Option<String>,
    #[serde(default)]
    pub(crate) admin: bool,
    pub(crate) created_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct AccessToken {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) token_hash: String,
    #[serde(default)]
    pub(crate) label: String,
    pub(crate) created_at: String,
    #[serde(default)]
    pub(crate) last_used_at: Option<String>,
    #[serde(default)]
    pub(crate) revoked_at: Option<String>,
    #[serde(default)]
    pub(crate) expires_at: Option<String>,
}

/// Authenticated caller, attached to the request by the auth middleware.
#[derive(Clone, Debug)]
pub(crate) struct Subject {
    pub(crate) user: String,
    pub(crate) display_name: Option<String>,
    pub(crate) admin: bool,
}
