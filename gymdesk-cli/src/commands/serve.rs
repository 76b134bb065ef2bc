//! HTTP server command
//!
//! Runs the registration page and JSON API until Ctrl+C/SIGTERM.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use gymdesk_server::{run_server, Database, ServerConfig};

use super::{resolve_config, DatabaseArgs};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:8501)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = resolve_config(args.db.database, args.bind)?;

    tracing::info!(
        "Starting gymdesk on http://{} (database: {})",
        config.bind_addr,
        config.database_path.display()
    );

    let db = Database::new(&config.database_path);

    // Run server (blocks until shutdown)
    run_server(db, ServerConfig::from(&config))
        .await
        .context("Server error")?;

    Ok(())
}
