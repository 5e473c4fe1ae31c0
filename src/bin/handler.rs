use anyhow::Result;
use clap::Parser;
use tracing::info;

use grabtube::{config, server};

/// The bare handler is the serverless-style deployment target and stays
/// quiet unless asked otherwise.
const DEFAULT_DEBUG: bool = false;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config file
    #[arg(short, long)]
    config: Option<String>,

    /// Port to listen on (overrides config and PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = config::load(args.config.as_deref(), DEFAULT_DEBUG)?;
    if let Some(port) = args.port {
        config.port = port;
    }

    config::init_tracing(&config);

    info!("Starting grabtube bare handler on port {}", config.port);
    server::bare::run(config).await
}
