//! Application config: Telegram connection, completion endpoint, exchange and dispatch settings.

use anyhow::{Context, Result};
use llm_client::EnvLlmConfig;
use market_data::ExchangeConfig;
use price_handlers::DEFAULT_COMMAND_PREFIX;
use pricebot_telegram::TelegramConfig;
use std::env;

/// Which chats get dynamic replies and what marks a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSettings {
    /// ALLOWED_CHAT_ID; direct messages are always allowed.
    pub allowed_chat_id: i64,
    /// COMMAND_PREFIX
    pub command_prefix: String,
}

impl DispatchSettings {
    /// ALLOWED_CHAT_ID is required and must be an integer.
    pub fn from_env() -> Result<Self> {
        let raw = env::var("ALLOWED_CHAT_ID").context("ALLOWED_CHAT_ID not set")?;
        let allowed_chat_id = raw
            .trim()
            .parse::<i64>()
            .with_context(|| format!("ALLOWED_CHAT_ID must be an integer, got {:?}", raw))?;
        let command_prefix = env::var("COMMAND_PREFIX")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.to_string());
        Ok(Self {
            allowed_chat_id,
            command_prefix,
        })
    }
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram: TelegramConfig,
    pub llm: EnvLlmConfig,
    pub exchange: ExchangeConfig,
    pub dispatch: DispatchSettings,
}

impl BotConfig {
    /// Loads every section from the environment. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        Ok(Self {
            telegram: TelegramConfig::load(token)?,
            llm: EnvLlmConfig::from_env()?,
            exchange: ExchangeConfig::from_env()?,
            dispatch: DispatchSettings::from_env()?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.telegram.validate()
    }
}
