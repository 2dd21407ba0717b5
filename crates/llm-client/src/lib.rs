//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait and an OpenAI implementation backed by [async-openai].
//! Transport-agnostic; used by price-handlers to generate replies.

use anyhow::Result;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs,
};
use async_trait::async_trait;

mod config;
mod mask;
mod message;
mod openai_llm;

pub use config::{EnvLlmConfig, LlmConfig, DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
pub use mask::mask_token;
pub use message::{ChatMessage, MessageRole};
pub use openai_llm::OpenAILlmClient;

/// Completion endpoint: returns the model reply text for the given messages.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> Result<String>;
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let content = msg.content.clone();
    let openai_msg: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(openai_msg)
}
