//! # pricebot-telegram
//!
//! Telegram layer: adapters to core types, [`pricebot_core::Bot`] implementation, connection config and REPL runner.
//! Knows nothing about prices or completions; every message goes to a [`handler_chain::Dispatcher`].

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::TelegramConfig;
pub use runner::run_repl;
