use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod render;

use commands::Commands;
use config::CliConfig;

#[derive(Parser)]
#[command(name = "assettree")]
#[command(about = "Browse location and asset hierarchies as sorted trees", long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/AssetTree/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    // Setup logging, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;
    cli.command.execute(&config)?;

    Ok(())
}
