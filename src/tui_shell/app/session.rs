use super::*;

impl App {
    pub(in crate::tui_shell) fn configured_remote(&self) -> Option<RemoteConfig> {
        let store = self.store.as_ref()?;
        store.read_config().ok()?.remote
    }

    fn require_store(&mut self) -> Option<ConsoleStore> {
        if let Some(store) = self.store.clone() {
            return Some(store);
        }
        let message = self
            .store_err
            .clone()
            .unwrap_or_else(|| "settings directory unavailable".to_string());
        self.push_error(message);
        None
    }

    pub(super) fn remote_client(&mut self) -> Option<RemoteClient> {
        let store = self.require_store()?;
        let config = match store.read_config() {
            Ok(config) => config,
            Err(err) => {
                self.push_error(format!("read config: {:#}", err));
                return None;
            }
        };
        let Some(remote) = config.remote else {
            self.push_error("no remote configured (run `login`)".to_string());
            return None;
        };
        let token = match store.get_remote_token(&remote) {
            Ok(Some(token)) => token,
            Ok(None) => {
                self.push_error("no token for this service (run `login`)".to_string());
                return None;
            }
            Err(err) => {
                self.push_error(format!("read token: {:#}", err));
                return None;
            }
        };
        match RemoteClient::new(remote, token) {
            Ok(client) => Some(client),
            Err(err) => {
                self.push_error(format!("remote client: {:#}", err));
                return None;
            }
        }
    }

    fn remote_client_quiet(&self) -> Option<RemoteClient> {
        let store = self.store.as_ref()?;
        let config = store.read_config().ok()?;
        let remote = config.remote?;
        let token = store.get_remote_token(&remote).ok()??;
        RemoteClient::new(remote, token).ok()
    }

    /// Try the stored token on startup. Failure is quiet; the header points
    /// at `login` instead.
    pub(super) fn try_restore_session(&mut self) {
        self.remote_label = self.configured_remote().map(|r| server_label(&r.base_url));
        let Some(client) = self.remote_client_quiet() else {
            if self.remote_label.is_some() {
                self.identity_note = Some("auth: login".to_string());
            }
            return;
        };
        match client.whoami() {
            Ok(identity) => {
                self.identity = Some(identity);
                self.identity_note = None;
                self.refresh_documents();
            }
            Err(err) => {
                let message = format!("{:#}", err);
                if message.contains("unauthorized") {
                    self.clear_stored_token();
                }
                self.identity_note = Some("auth: login".to_string());
            }
        }
    }

    fn clear_stored_token(&mut self) {
        let Some(store) = self.store.clone() else {
            return;
        };
        let Ok(config) = store.read_config() else {
            return;
        };
        let Some(remote) = config.remote else {
            return;
        };
        store.clear_remote_token(&remote).ok();
    }

    /// Verify the URL and token against the service before persisting either.
    pub(in crate::tui_shell) fn apply_login(&mut self, base_url: String, token: String) {
        let remote = RemoteConfig {
            base_url,
            token: None,
        };
        let client = match RemoteClient::new(remote.clone(), token.clone()) {
            Ok(client) => client,
            Err(err) => {
                self.push_error(format!("login: {:#}", err));
                return;
            }
        };
        let identity = match client.whoami() {
            Ok(identity) => identity,
            Err(err) => {
                self.push_error(format!("login: {:#}", err));
                return;
            }
        };

        let Some(store) = self.require_store() else {
            return;
        };
        let mut config = match store.read_config() {
            Ok(config) => config,
            Err(err) => {
                self.push_error(format!("read config: {:#}", err));
                return;
            }
        };
        config.remote = Some(remote.clone());
        if let Err(err) = store.write_config(&config) {
            self.push_error(format!("write config: {:#}", err));
            return;
        }
        if let Err(err) = store.set_remote_token(&remote, &token) {
            self.push_error(format!("store token: {:#}", err));
            return;
        }

        self.remote_label = Some(server_label(&remote.base_url));
        self.identity_note = None;
        let mut lines = vec![format!("logged in as {}", identity.label())];
        if !identity.administrator {
            lines.push("read-only session (no administrator capability)".to_string());
        }
        self.identity = Some(identity);
        self.push_output(lines);
        self.refresh_documents();
    }

    pub(super) fn cmd_logout(&mut self) {
        self.clear_stored_token();
        self.identity = None;
        self.identity_note = Some("auth: login".to_string());
        self.configurations.load(Vec::new());
        self.clusters.load(Vec::new());
        self.rebuild_views();
        self.push_output(vec!["logged out".to_string()]);
    }

    pub(super) fn cmd_whoami(&mut self) {
        let Some(client) = self.remote_client() else {
            return;
        };
        match client.whoami() {
            Ok(identity) => {
                let mut lines = vec![format!("user: {}", identity.user)];
                if let Some(display) = &identity.display_name {
                    lines.push(format!("display name: {}", display));
                }
                lines.push(format!(
                    "administrator: {}",
                    if identity.administrator { "yes" } else { "no" }
                ));
                self.identity = Some(identity);
                self.identity_note = None;
                self.push_output(lines);
            }
            Err(err) => self.push_error(format!("whoami: {:#}", err)),
        }
    }

    /// Fetch both collections, then swap them in together. A half-refreshed
    /// console would pair stale baselines with fresh documents.
    pub(super) fn refresh_documents(&mut self) {
        let Some(client) = self.remote_client() else {
            return;
        };
        let configurations = match client.fetch_configurations() {
            Ok(docs) => docs,
            Err(err) => {
                self.fail_session(format!("list configurations: {:#}", err));
                return;
            }
        };
        let clusters = match client.fetch_clusters() {
            Ok(docs) => docs,
            Err(err) => {
                self.fail_session(format!("list clusters: {:#}", err));
                return;
            }
        };
        self.configurations.load(configurations);
        self.clusters.load(clusters);
        self.rebuild_views();
        self.push_output(vec![format!(
            "loaded {} configurations and {} clusters",
            self.configurations.documents().len(),
            self.clusters.documents().len()
        )]);
    }

    /// A failed bulk load ends the session rather than leaving half-loaded
    /// collections open for editing.
    fn fail_session(&mut self, message: String) {
        if message.contains("unauthorized") {
            self.clear_stored_token();
        }
        self.configurations.load(Vec::new());
        self.clusters.load(Vec::new());
        self.rebuild_views();
        self.push_error(message);
        self.identity = None;
        self.identity_note = Some("auth: login".to_string());
    }
}

/// Host shown beside the identity, without scheme or trailing slash.
pub(super) fn server_label(base_url: &str) -> String {
    base_url
        .trim_end_matches('/')
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .to_string()
}
