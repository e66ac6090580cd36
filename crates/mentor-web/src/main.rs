//! `mentord` — web backend for the code-mentor chat service.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use mentor_gateway::{FallbackPolicy, ModelGateway};
use mentor_history::HistoryStore;
use mentor_web::identity::HeaderIdentity;
use mentor_web::{router, AppState};

#[derive(Parser)]
#[command(name = "mentord", version, about = "Code-mentor chat backend")]
struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:7860")]
    listen: SocketAddr,

    /// Directory holding per-user history files
    #[arg(long, default_value = "chat_history")]
    history_dir: PathBuf,

    /// Reject model names that match no registered alias instead of
    /// treating them as literal backend model paths
    #[arg(long)]
    strict_models: bool,

    /// Trusted header carrying the authenticated username; omit to serve
    /// every request as the anonymous identity
    #[arg(long)]
    identity_header: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let fallback = if cli.strict_models {
        FallbackPolicy::Deny
    } else {
        FallbackPolicy::LiteralModel
    };
    let gateway = ModelGateway::from_env().with_fallback_policy(fallback);

    let state = AppState {
        gateway: Arc::new(gateway),
        history: Arc::new(HistoryStore::new(cli.history_dir)),
        identity: cli
            .identity_header
            .map(|header| Arc::new(HeaderIdentity::new(header)) as _),
    };

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(cli.listen).await?;
    tracing::info!("listening on http://{}", cli.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
