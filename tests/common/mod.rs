#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Child, Command};
use std::time::{Duration, Instant};

use tempfile::TempDir;

pub const ADMIN_TOKEN: &str = "dev-token";
pub const VIEWER_TOKEN: &str = "viewer-token";

/// A `confdesk-server` child bound to an ephemeral port, killed on drop.
pub struct ServerGuard {
    child: Child,
    pub base_url: String,
    data_dir: TempDir,
}

impl ServerGuard {
    pub fn start() -> ServerGuard {
        let data_dir = TempDir::new().expect("temp data dir");
        let addr_file = data_dir.path().join("addr.txt");
        let child = Command::new(env!("CARGO_BIN_EXE_confdesk-server"))
            .arg("--addr")
            .arg("127.0.0.1:0")
            .arg("--addr-file")
            .arg(&addr_file)
            .arg("--data-dir")
            .arg(data_dir.path().join("data"))
            .arg("--dev-user")
            .arg("dev")
            .arg("--dev-token")
            .arg(ADMIN_TOKEN)
            .arg("--dev-viewer-token")
            .arg(VIEWER_TOKEN)
            .spawn()
            .expect("spawn confdesk-server");

        let deadline = Instant::now() + Duration::from_secs(10);
        let addr = loop {
            if let Ok(contents) = std::fs::read_to_string(&addr_file) {
                let contents = contents.trim().to_string();
                if !contents.is_empty() {
                    break contents;
                }
            }
            assert!(
                Instant::now() < deadline,
                "server did not write its address file"
            );
            std::thread::sleep(Duration::from_millis(25));
        };
        let base_url = format!("http://{}", addr);

        let client = reqwest::blocking::Client::new();
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Ok(resp) = client.get(format!("{}/healthz", base_url)).send() {
                if resp.status().is_success() {
                    break;
                }
            }
            assert!(Instant::now() < deadline, "server never became healthy");
            std::thread::sleep(Duration::from_millis(25));
        }

        ServerGuard {
            child,
            base_url,
            data_dir,
        }
    }

    pub fn data_path(&self) -> PathBuf {
        self.data_dir.path().join("data")
    }
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        self.child.kill().ok();
        self.child.wait().ok();
    }
}
