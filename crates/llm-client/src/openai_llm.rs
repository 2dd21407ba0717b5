//! OpenAI implementation of [`LlmClient`]: one non-streamed chat completion per call,
//! capped at `max_tokens` generated tokens, with an optional leading system message.

use anyhow::Result;
use async_openai::config::OpenAIConfig;
use async_openai::types::{ChatCompletionRequestMessage, CreateChatCompletionRequestArgs};
use async_openai::Client;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

use super::{chat_message_to_openai, ChatMessage, LlmClient, LlmConfig};
use crate::config::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use crate::mask_token;

/// LlmClient backed by async-openai.
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: Arc<Client<OpenAIConfig>>,
    /// Kept only for masked logging.
    api_key: String,
    model: String,
    max_tokens: u32,
    system_prompt: Option<String>,
}

impl OpenAILlmClient {
    pub fn new(api_key: String) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key.clone());
        Self::with_openai_config(config, api_key)
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key.clone())
            .with_api_base(base_url);
        Self::with_openai_config(config, api_key)
    }

    /// Builds a client from any [`LlmConfig`] (key, base URL, model, max tokens, system prompt).
    pub fn from_config(config: &dyn LlmConfig) -> Self {
        Self::with_base_url(config.api_key().to_string(), config.base_url().to_string())
            .with_model(config.model().to_string())
            .with_max_tokens(config.max_tokens())
            .with_system_prompt_opt(config.system_prompt().map(String::from))
    }

    fn with_openai_config(config: OpenAIConfig, api_key: String) -> Self {
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            system_prompt: None,
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_system_prompt_opt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// The configured system prompt (if any) followed by `messages`, in OpenAI format.
    fn request_messages(&self, messages: &[ChatMessage]) -> Result<Vec<ChatCompletionRequestMessage>> {
        self.system_prompt
            .iter()
            .map(|prompt| ChatMessage::system(prompt.as_str()))
            .chain(messages.iter().cloned())
            .map(|msg| chat_message_to_openai(&msg))
            .collect()
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[allow(deprecated)]
    #[instrument(skip(self, messages))]
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let openai_messages = self.request_messages(&messages)?;

        info!(
            model = %self.model,
            message_count = openai_messages.len(),
            max_tokens = self.max_tokens,
            api_key = %mask_token(&self.api_key),
            "OpenAI chat_completion request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(openai_messages)
            .max_tokens(self.max_tokens)
            .build()?;

        if let Ok(json) = serde_json::to_string(&request) {
            tracing::debug!(request_json = %json, "OpenAI chat_completion request JSON");
        }

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "OpenAI chat_completion usage"
            );
        }

        match response.choices.first() {
            Some(choice) => Ok(choice.message.content.clone().unwrap_or_default()),
            None => anyhow::bail!("No response from OpenAI"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EnvLlmConfig;

    #[test]
    fn test_defaults() {
        let client = OpenAILlmClient::new("sk-test".to_string());
        assert_eq!(client.model(), "gpt-3.5-turbo");
        assert_eq!(client.max_tokens(), 200);
        assert!(client.system_prompt.is_none());
    }

    #[test]
    fn test_from_config() {
        let config = EnvLlmConfig {
            openai_api_key: "sk-test".to_string(),
            openai_base_url: "http://localhost:1234/v1".to_string(),
            llm_model: "local-model".to_string(),
            llm_max_tokens: 50,
            llm_system_prompt: Some("Plain text only.".to_string()),
        };

        let client = OpenAILlmClient::from_config(&config);

        assert_eq!(client.model(), "local-model");
        assert_eq!(client.max_tokens(), 50);
        assert_eq!(client.system_prompt.as_deref(), Some("Plain text only."));
    }

    #[test]
    fn test_system_prompt_leads_request_messages() {
        let client = OpenAILlmClient::new("sk-test".to_string())
            .with_system_prompt_opt(Some("Plain text only.".to_string()));

        let messages = client
            .request_messages(&[ChatMessage::user("btc price?")])
            .unwrap();

        assert_eq!(messages.len(), 2);
        assert!(matches!(messages[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(messages[1], ChatCompletionRequestMessage::User(_)));
    }

    #[test]
    fn test_no_system_message_without_prompt() {
        let client = OpenAILlmClient::new("sk-test".to_string());

        let messages = client
            .request_messages(&[ChatMessage::user("btc price?")])
            .unwrap();

        assert_eq!(messages.len(), 1);
        assert!(matches!(messages[0], ChatCompletionRequestMessage::User(_)));
    }
}
