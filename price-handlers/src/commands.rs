//! Command-processing collaborator. Command messages are handed here and never get a dynamic reply.

use async_trait::async_trait;
use pricebot_core::{Message, Result};
use tracing::info;

/// Processes a message that starts with the command prefix. Errors surface as an error reply.
#[async_trait]
pub trait CommandProcessor: Send + Sync {
    async fn process(&self, command: &str, message: &Message) -> Result<()>;
}

/// No commands are registered; command messages are logged and dropped.
#[derive(Clone, Default)]
pub struct NoopCommandProcessor;

impl NoopCommandProcessor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandProcessor for NoopCommandProcessor {
    async fn process(&self, command: &str, message: &Message) -> Result<()> {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            command = %command,
            "No handler registered for command"
        );
        Ok(())
    }
}
