//! Command implementations for the gymdesk CLI

pub mod config;
pub mod init;
pub mod list;
pub mod serve;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use gymdesk_core::GymdeskConfig;

// Re-export dispatcher functions for flat access from main.rs
pub use config::run_config;
pub use init::run_init;
pub use list::run_list;
pub use serve::run_serve;

/// Database location shared by commands that touch the store
#[derive(Args, Debug, Clone, Default)]
pub struct DatabaseArgs {
    /// SQLite file (overrides config/environment)
    #[arg(long, short = 'd', value_name = "PATH")]
    pub database: Option<PathBuf>,
}

/// Load config from file/environment, then apply command-line overrides
pub(crate) fn resolve_config(
    database: Option<PathBuf>,
    bind: Option<SocketAddr>,
) -> Result<GymdeskConfig> {
    let mut config = GymdeskConfig::load().context("Failed to load gymdesk configuration")?;

    if let Some(database) = database {
        config.database_path = database;
    }
    if let Some(bind) = bind {
        config.bind_addr = bind;
    }

    tracing::debug!(
        database = %config.database_path.display(),
        bind = %config.bind_addr,
        "configuration resolved"
    );
    Ok(config)
}
