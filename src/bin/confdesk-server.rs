//! Development configuration service backing the confdesk console: bearer
//! token auth, trimmed and audited document writes, JSON files on disk.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Extension;
use axum::Router;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, put};
use clap::Parser;
use tokio::net::TcpListener;

#[path = "confdesk_server/documents.rs"]
mod documents;
#[path = "confdesk_server/http_error.rs"]
mod http_error;
#[path = "confdesk_server/identity_store.rs"]
mod identity_store;
#[path = "confdesk_server/persistence.rs"]
mod persistence;
#[path = "confdesk_server/types.rs"]
mod types;

use self::documents::DocumentStore;
use self::http_error::unauthorized;
use self::identity_store::IdentityStore;
use self::types::Subject;

#[derive(Parser)]
#[command(name = "confdesk-server")]
#[command(about = "Development configuration service for confdesk", long_about = None)]
struct Args {
    /// Address to bind (use port 0 to pick a free port)
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: String,

    /// Write the bound address to this file once listening
    #[arg(long, value_name = "PATH")]
    addr_file: Option<PathBuf>,

    /// Directory for document and identity files
    #[arg(long, value_name = "DIR", default_value = "./confdesk-data")]
    data_dir: PathBuf,

    /// Handle of the bootstrap administrator
    #[arg(long, default_value = "dev")]
    dev_user: String,

    /// Token minted for the bootstrap administrator
    #[arg(long, default_value = "dev")]
    dev_token: String,

    /// Also mint a read-only user ("viewer") with this token
    #[arg(long)]
    dev_viewer_token: Option<String>,
}

#[derive(Clone)]
struct AppState {
    identity: Arc<IdentityStore>,
    documents: Arc<DocumentStore>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    std::fs::create_dir_all(&args.data_dir)
        .with_context(|| format!("create data dir {}", args.data_dir.display()))?;

    let identity = IdentityStore::open(&args.data_dir)?;
    identity.bootstrap(
        &args.dev_user,
        &args.dev_token,
        args.dev_viewer_token.as_deref(),
    )?;
    let documents = DocumentStore::open(&args.data_dir)?;

    let state = AppState {
        identity: Arc::new(identity),
        documents: Arc::new(documents),
    };

    let authed = Router::new()
        .route("/whoami", get(whoami))
        .route(
            "/configurations",
            get(documents::list_configurations).post(documents::create_configuration),
        )
        .route("/configurations/:id", put(documents::update_configuration))
        .route(
            "/clusters",
            get(documents::list_clusters).post(documents::create_cluster),
        )
        .route("/clusters/:id", put(documents::update_cluster))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    let app = Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .merge(authed)
        .with_state(state);

    let listener = TcpListener::bind(&args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;
    let local: SocketAddr = listener.local_addr().context("local addr")?;
    if let Some(path) = &args.addr_file {
        std::fs::write(path, local.to_string())
            .with_context(|| format!("write addr file {}", path.display()))?;
    }
    eprintln!("confdesk-server listening on http://{}", local);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve")?;
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
}

async fn require_bearer(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let Some(token) = header.strip_prefix("Bearer ") else {
        return unauthorized("missing bearer token");
    };
    let subject = match state.identity.authenticate(token) {
        Ok(Some(subject)) => subject,
        Ok(None) => return unauthorized("unknown or revoked token"),
        Err(err) => return http_error::internal_error(&format!("identity lookup: {:#}", err)),
    };
    request.extensions_mut().insert(subject);
    next.run(request).await
}

async fn whoami(Extension(subject): Extension<Subject>) -> Response {
    http_error::json_bytes(&serde_json::json!({
        "user": subject.user,
        "displayName": subject.display_name,
        "administrator": subject.admin,
    }))
}
