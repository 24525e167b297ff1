//! DTOs for remote API responses.

/// `/whoami` response: the authenticated user and their capabilities.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoAmI {
    pub user: String,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub administrator: bool,
}

impl WhoAmI {
    /// Preferred label for the header line.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.user)
    }
}
