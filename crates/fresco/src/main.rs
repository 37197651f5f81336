//! Fresco bot binary.
//!
//! Loads configuration from the environment (and `.env`), initializes
//! tracing, and runs the Discord client until shutdown.

use clap::Parser;
use fresco_social::{BotConfig, FrescoBot};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the bot.
#[derive(Parser, Debug)]
#[command(name = "fresco")]
#[command(about = "Mirror one Discord server's structure onto another")]
#[command(version)]
struct Args {
    /// Override the command prefix from the environment
    #[arg(long)]
    prefix: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let mut config = BotConfig::from_env()?;
    if let Some(prefix) = args.prefix {
        config.prefix = prefix;
    }
    info!(
        prefix = %config.prefix,
        admin_roles = config.admin_roles.len(),
        "Configuration loaded"
    );

    let mut bot = FrescoBot::new(config).await?;
    bot.start().await?;
    Ok(())
}
