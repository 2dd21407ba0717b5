//! Core types: user, chat, message, filter decision, handler response, and the Handler / MessageFilter traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub is_bot: bool,
}

/// Chat the message was posted in. `is_direct` is true for one-to-one chats with the bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub is_direct: bool,
    pub title: Option<String>,
}

/// One inbound message. The core only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Outcome of a [`MessageFilter`]. `Reject` carries a short reason for the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    Accept,
    Reject(&'static str),
}

/// Handler result for the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain without replying.
    Stop,
    /// Stop the chain and send this text back to the originating chat.
    Reply(String),
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Gate run before any handler. The first `Reject` ends processing with no reply.
#[async_trait]
pub trait MessageFilter: Send + Sync {
    async fn check(&self, message: &Message) -> crate::error::Result<FilterDecision>;
}

/// Produces the response for an accepted message. The chain stops at the first Stop or Reply.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
}
