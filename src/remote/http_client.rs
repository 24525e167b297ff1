use super::*;

impl RemoteClient {
    /// Maps non-success responses to errors. Auth failures get a hint; for
    /// everything else the server's `{"error": ...}` body is surfaced when
    /// present. Requests are never retried; saves must run exactly once.
    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> Result<reqwest::blocking::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            anyhow::bail!(
                "unauthorized (token invalid/expired; run `confdesk login --url ... --token ...`)"
            );
        }
        if status == reqwest::StatusCode::FORBIDDEN {
            anyhow::bail!("forbidden (administrator capability required)");
        }
        let message = resp
            .json::<serde_json::Value>()
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string));
        match message {
            Some(msg) => anyhow::bail!("{}: {}", label, msg),
            None => anyhow::bail!("{}: unexpected status {}", label, status),
        }
    }

    pub(super) fn auth(&self) -> String {
        format!("Bearer {}", self.token)
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.remote.base_url, path)
    }
}
