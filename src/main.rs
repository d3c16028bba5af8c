// ABOUTME: Entry point for the alunos binary.
// ABOUTME: Parses CLI arguments, initializes tracing, opens the store, and starts the HTTP server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use alunos_server::{AppState, ServerConfig, create_router};
use alunos_store::StudentStore;
use anyhow::Context;
use clap::Parser;

/// Student records CRUD service.
#[derive(Debug, Parser)]
#[command(name = "alunos", version, about)]
struct Cli {
    /// Socket address to listen on (overrides ALUNOS_BIND)
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// SQLite database file (overrides ALUNOS_DB)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Directory of static front-end files (overrides ALUNOS_PUBLIC_DIR)
    #[arg(long)]
    public_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "alunos=debug,alunos_server=debug,alunos_store=debug,tower_http=debug",
                )
            }),
        )
        .init();

    let cli = Cli::parse();
    let mut config = ServerConfig::from_env()?;
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(public_dir) = cli.public_dir {
        config.public_dir = public_dir;
    }

    let store = StudentStore::open(&config.db_path)
        .with_context(|| format!("failed to open database at {}", config.db_path.display()))?;
    tracing::debug!(db = %config.db_path.display(), "database opened");

    let state = Arc::new(AppState::new(store, config.public_dir));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    tracing::info!("API running at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("alunos shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {}", e);
    }
}
