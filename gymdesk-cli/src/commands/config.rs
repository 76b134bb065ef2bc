use anyhow::Result;
use clap::{Parser, Subcommand};
use gymdesk_core::GymdeskConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Print the effective configuration (file + environment) as TOML
    Show,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Path => run_path(),
        ConfigCommands::Show => run_show(),
    }
}

fn run_path() -> Result<()> {
    let path = GymdeskConfig::config_path();
    if path.exists() {
        println!("{}", path.display());
    } else {
        println!("{} (not present, using defaults)", path.display());
    }
    Ok(())
}

fn run_show() -> Result<()> {
    let config = GymdeskConfig::load()?;
    print!("{}", config.to_toml()?);
    Ok(())
}
