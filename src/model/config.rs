use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub version: u32,

    #[serde(default)]
    pub remote: Option<RemoteConfig>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            version: 1,
            remote: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub base_url: String,

    // Token is stored in console state, not config.json.
    // Kept as an optional field for backwards-compatible parsing of older config files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConsoleState {
    pub version: u32,

    /// Bearer tokens keyed by remote base URL.
    #[serde(default)]
    pub remote_tokens: std::collections::HashMap<String, String>,
}
