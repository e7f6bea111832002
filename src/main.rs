use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod repl;

use buraco_scorekeeper::config::{load_config, load_default_config};

#[derive(Parser)]
#[command(name = "buraco-scorekeeper", about = "Buraco score-keeping session")]
struct Cli {
    /// Resume from a saved match file
    #[arg(short, long)]
    load: Option<PathBuf>,

    /// Path to scorekeeper.toml (default: auto-discover)
    #[arg(long, env = "BURACO_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path).map_err(|e| format!("Failed to load config: {}", e))?,
        None => load_default_config(),
    };

    repl::run(config, cli.load.as_deref())
}
