//! Market-making bot entry point.

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use mm_bot::{init_logging, AppConfig, Application};

/// Single-instrument market-making bot (replay-driven)
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via MM_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Override the recording directory to replay
    #[arg(long)]
    data_dir: Option<String>,

    /// Override the output directory
    #[arg(long)]
    out_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging()?;

    info!("Starting mm-bot v{}", env!("CARGO_PKG_VERSION"));

    let config_path = args
        .config
        .or_else(|| std::env::var("MM_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    let mut config = if Path::new(&config_path).exists() {
        info!(config_path = %config_path, "Loading configuration");
        AppConfig::from_file(&config_path)?
    } else {
        warn!(path = %config_path, "Config file not found, using defaults");
        AppConfig::default()
    };

    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(out_dir) = args.out_dir {
        config.out_dir = Some(out_dir);
    }

    let mut app = Application::new(config)?;
    app.run().await?;

    Ok(())
}
