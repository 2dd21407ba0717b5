//! # pricebot
//!
//! Crypto price assistant for Telegram. Wires the symbol resolver, Binance quotes and the
//! completion endpoint into a [`handler_chain::Dispatcher`], and guards start-up with a
//! [`BotSupervisor`] so at most one bot instance runs per process.

pub mod assembly;
pub mod config;
pub mod supervisor;

pub use assembly::{build_dispatcher, DispatchComponents};
pub use config::{BotConfig, DispatchSettings};
pub use supervisor::{BotSupervisor, LifecycleState, StartOutcome};

use anyhow::Result;
use pricebot_telegram::run_repl;
use tracing::{info, instrument};

/// Builds every component and runs the REPL until it stops.
#[instrument(skip(config, supervisor))]
async fn launch(config: BotConfig, supervisor: BotSupervisor) -> Result<()> {
    config.validate()?;
    info!(
        allowed_chat_id = config.dispatch.allowed_chat_id,
        command_prefix = %config.dispatch.command_prefix,
        "Initializing bot"
    );

    let teloxide_bot = config.telegram.build_bot();
    let components = DispatchComponents::from_config(&config, teloxide_bot.clone())?;
    let bot_user_id = components.bot_user_id.clone();
    let dispatcher = build_dispatcher(&config.dispatch, components);

    supervisor.mark_running();
    run_repl(teloxide_bot, dispatcher, bot_user_id).await
}

/// Foreground entry point. Returns `AlreadyActive` without doing anything if the bot is already up.
pub async fn run_bot(supervisor: &BotSupervisor, config: BotConfig) -> Result<StartOutcome> {
    supervisor.start(move |s| launch(config, s)).await
}

/// Background entry point for hosts that must not block. Returns a status line for the caller.
pub fn start_bot_in_background(
    supervisor: &BotSupervisor,
    config: BotConfig,
) -> Result<&'static str> {
    let outcome = supervisor.spawn_background(move |s| launch(config, s))?;
    Ok(outcome.status_message())
}
