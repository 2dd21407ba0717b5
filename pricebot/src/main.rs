//! pricebot CLI: runs the Telegram price assistant. Config from env and optional CLI args.

use anyhow::Result;
use clap::{Parser, Subcommand};
use pricebot::{run_bot, BotConfig, BotSupervisor, StartOutcome};
use pricebot_core::init_tracing;
use tracing::info;

#[derive(Parser)]
#[command(name = "pricebot")]
#[command(about = "Telegram crypto price assistant", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = BotConfig::load(token)?;
            init_tracing(config.telegram.log_file.as_deref())?;
            info!(config = ?config, "Configuration loaded");

            let supervisor = BotSupervisor::new();
            if let StartOutcome::AlreadyActive(state) = run_bot(&supervisor, config).await? {
                info!(state = ?state, "Bot already active");
            }
            Ok(())
        }
    }
}
