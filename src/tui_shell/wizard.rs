use super::{App, TextInputAction};

/// Two-step login prompt: service URL, then token. Nothing is persisted
/// until the service has accepted both.
#[derive(Debug, Default)]
pub(super) struct LoginWizard {
    url: Option<String>,
}

impl App {
    pub(in crate::tui_shell) fn start_login_wizard(&mut self) {
        let default_url = self
            .configured_remote()
            .map(|remote| remote.base_url)
            .unwrap_or_else(|| "http://127.0.0.1:8080".to_string());
        self.login_wizard = Some(LoginWizard::default());
        self.open_text_input_modal(
            "Login",
            "url> ",
            TextInputAction::LoginUrl,
            Some(&default_url),
            vec!["Configuration service base URL.".to_string()],
        );
    }

    pub(in crate::tui_shell) fn continue_login_wizard(
        &mut self,
        action: TextInputAction,
        value: String,
    ) {
        if self.login_wizard.is_none() {
            self.push_error("login wizard is not active".to_string());
            return;
        }
        match action {
            TextInputAction::LoginUrl => {
                let url = value.trim().trim_end_matches('/').to_string();
                if let Some(wizard) = self.login_wizard.as_mut() {
                    wizard.url = Some(url);
                }
                self.open_text_input_modal(
                    "Login",
                    "token> ",
                    TextInputAction::LoginToken,
                    None,
                    vec!["Bearer token for the service.".to_string()],
                );
            }
            TextInputAction::LoginToken => {
                let Some(url) = self.login_wizard.as_ref().and_then(|w| w.url.clone()) else {
                    self.login_wizard = None;
                    self.push_error("login wizard lost its URL; start again".to_string());
                    return;
                };
                self.login_wizard = None;
                self.apply_login(url, value);
            }
            _ => {}
        }
    }

    pub(in crate::tui_shell) fn cancel_wizards(&mut self) {
        self.login_wizard = None;
    }
}
