//! Filters that decide whether a message gets a dynamic reply: not from the bot itself,
//! not a command, and either a direct message or posted in the allowed chat.

use async_trait::async_trait;
use pricebot_core::{FilterDecision, Message, MessageFilter, Result};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::commands::CommandProcessor;

/// Telegram's command convention.
pub const DEFAULT_COMMAND_PREFIX: &str = "/";

/// Rejects messages authored by the bot. The bot's user id is learned at start-up (getMe).
pub struct SelfMessageFilter {
    bot_user_id: Arc<RwLock<Option<i64>>>,
}

impl SelfMessageFilter {
    pub fn new(bot_user_id: Arc<RwLock<Option<i64>>>) -> Self {
        Self { bot_user_id }
    }
}

#[async_trait]
impl MessageFilter for SelfMessageFilter {
    async fn check(&self, message: &Message) -> Result<FilterDecision> {
        let own_id = *self.bot_user_id.read().await;
        if own_id == Some(message.user.id) {
            debug!(user_id = message.user.id, "Ignoring message from the bot itself");
            return Ok(FilterDecision::Reject("message from the bot itself"));
        }
        Ok(FilterDecision::Accept)
    }
}

/// Hands command messages to the [`CommandProcessor`] and keeps them out of the dynamic reply path.
pub struct CommandFilter {
    prefix: String,
    processor: Arc<dyn CommandProcessor>,
}

impl CommandFilter {
    /// An empty prefix would match every message, so it falls back to [`DEFAULT_COMMAND_PREFIX`].
    pub fn new(prefix: impl Into<String>, processor: Arc<dyn CommandProcessor>) -> Self {
        let prefix = prefix.into();
        let prefix = if prefix.is_empty() {
            DEFAULT_COMMAND_PREFIX.to_string()
        } else {
            prefix
        };
        Self { prefix, processor }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

#[async_trait]
impl MessageFilter for CommandFilter {
    async fn check(&self, message: &Message) -> Result<FilterDecision> {
        let Some(rest) = message.content.strip_prefix(self.prefix.as_str()) else {
            return Ok(FilterDecision::Accept);
        };
        let command = rest.split_whitespace().next().unwrap_or("");
        info!(command = %command, "Message is a command; delegating");
        self.processor.process(command, message).await?;
        Ok(FilterDecision::Reject("command message"))
    }
}

/// Accepts direct messages and messages from the one configured chat.
pub struct ChannelFilter {
    allowed_chat_id: i64,
}

impl ChannelFilter {
    pub fn new(allowed_chat_id: i64) -> Self {
        Self { allowed_chat_id }
    }
}

#[async_trait]
impl MessageFilter for ChannelFilter {
    async fn check(&self, message: &Message) -> Result<FilterDecision> {
        if message.chat.is_direct {
            debug!(chat_id = message.chat.id, "Handling direct message");
            return Ok(FilterDecision::Accept);
        }
        if message.chat.id == self.allowed_chat_id {
            debug!(chat_id = message.chat.id, "Handling message in the allowed chat");
            return Ok(FilterDecision::Accept);
        }
        Ok(FilterDecision::Reject("chat not allowed"))
    }
}
