use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use confdesk::model::RemoteConfig;
use confdesk::remote::RemoteClient;
use confdesk::store::ConsoleStore;

#[derive(Parser)]
#[command(name = "confdesk")]
#[command(about = "Admin console for elastic configuration and cluster documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a service URL and token, then store them
    Login {
        #[arg(long)]
        url: String,
        #[arg(long)]
        token: String,
    },

    /// Forget the stored token for the configured service
    Logout,

    /// Show the authenticated user
    Whoami {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List configuration documents
    Configurations {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List cluster documents
    Clusters {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one document by id
    Show {
        id: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Open the interactive console (default)
    Tui,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        None | Some(Commands::Tui) => confdesk::tui::run(),
        Some(Commands::Login { url, token }) => cmd_login(url, token),
        Some(Commands::Logout) => cmd_logout(),
        Some(Commands::Whoami { json }) => cmd_whoami(json),
        Some(Commands::Configurations { json }) => cmd_configurations(json),
        Some(Commands::Clusters { json }) => cmd_clusters(json),
        Some(Commands::Show { id, json }) => cmd_show(&id, json),
    }
}

fn client() -> Result<RemoteClient> {
    let store = ConsoleStore::open_default()?;
    let cfg = store.read_config()?;
    let remote = cfg
        .remote
        .context("no remote configured (run `confdesk login --url ... --token ...`)")?;
    let token = store
        .get_remote_token(&remote)?
        .context("no remote token stored (run `confdesk login --url ... --token ...`)")?;
    RemoteClient::new(remote, token)
}

fn cmd_login(url: String, token: String) -> Result<()> {
    let base_url = url.trim().trim_end_matches('/').to_string();
    let remote = RemoteConfig {
        base_url,
        token: None,
    };
    let client = RemoteClient::new(remote.clone(), token.clone())?;
    let who = client.whoami().context("verify the URL and token")?;

    let store = ConsoleStore::open_default()?;
    let mut cfg = store.read_config()?;
    cfg.remote = Some(remote.clone());
    store.write_config(&cfg)?;
    store
        .set_remote_token(&remote, &token)
        .context("store remote token in state.json")?;

    println!("Logged in as {}", who.label());
    if !who.administrator {
        println!("(read-only: no administrator capability)");
    }
    Ok(())
}

fn cmd_logout() -> Result<()> {
    let store = ConsoleStore::open_default()?;
    let cfg = store.read_config()?;
    if let Some(remote) = cfg.remote {
        store.clear_remote_token(&remote)?;
    }
    println!("Logged out");
    Ok(())
}

fn cmd_whoami(json: bool) -> Result<()> {
    let who = client()?.whoami()?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&who).context("serialize whoami json")?
        );
        return Ok(());
    }
    println!("user: {}", who.user);
    if let Some(display) = &who.display_name {
        println!("display name: {}", display);
    }
    println!(
        "administrator: {}",
        if who.administrator { "yes" } else { "no" }
    );
    Ok(())
}

fn cmd_configurations(json: bool) -> Result<()> {
    let docs = client()?.fetch_configurations()?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&docs).context("serialize configurations json")?
        );
        return Ok(());
    }
    if docs.is_empty() {
        println!("No configuration documents");
        return Ok(());
    }
    for doc in docs {
        println!(
            "{}  v{}  {}  ({} organisations)",
            doc.id,
            doc.version,
            doc.name,
            doc.organisations.len()
        );
    }
    Ok(())
}

fn cmd_clusters(json: bool) -> Result<()> {
    let docs = client()?.fetch_clusters()?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&docs).context("serialize clusters json")?
        );
        return Ok(());
    }
    if docs.is_empty() {
        println!("No cluster documents");
        return Ok(());
    }
    for doc in docs {
        println!(
            "{}  v{}  {}  app={}  ({} members)",
            doc.id,
            doc.version,
            doc.name,
            doc.application,
            doc.organisations.len()
        );
    }
    Ok(())
}

fn cmd_show(id: &str, json: bool) -> Result<()> {
    let client = client()?;

    if let Some(doc) = client
        .fetch_configurations()?
        .into_iter()
        .find(|d| d.id == id)
    {
        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&doc).context("serialize configuration json")?
            );
            return Ok(());
        }
        println!("configuration {} (v{})", doc.name, doc.version);
        for org in &doc.organisations {
            println!(
                "  {}  alias={}  nodes=[{}]",
                org.organisation_name,
                org.elastic_alias,
                org.elastic_nodes.join(", ")
            );
        }
        return Ok(());
    }

    if let Some(doc) = client.fetch_clusters()?.into_iter().find(|d| d.id == id) {
        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&doc).context("serialize cluster json")?
            );
            return Ok(());
        }
        println!("cluster {} (v{})  app={}", doc.name, doc.version, doc.application);
        for (api, url) in &doc.user_apis {
            println!("  api {} = {}", api, url);
        }
        for member in &doc.organisations {
            println!("  member {}", member);
        }
        return Ok(());
    }

    anyhow::bail!("no document with id '{}'", id);
}
