//! Reply generation through the completion endpoint.

use llm_client::{ChatMessage, LlmClient};
use market_data::MarketQuote;
use pricebot_core::{BotError, Result};
use std::sync::Arc;
use tracing::{info, instrument};

const PROMPT_PREFIX: &str = "Respond to this message as an expert in finance and crypto trading: ";

/// Builds the single user prompt; the quote sentence is appended only when a quote is present.
pub fn build_prompt(message_text: &str, quote: Option<&MarketQuote>) -> String {
    let mut prompt = format!("{}{}", PROMPT_PREFIX, message_text);
    if let Some(quote) = quote {
        prompt.push_str(&format!(
            " The current price for {} is {} USD.",
            quote.symbol, quote.close_price
        ));
    }
    prompt
}

/// Produces natural-language replies. Errors from the endpoint become [`BotError::Generation`].
#[derive(Clone)]
pub struct ResponseGenerator {
    llm: Arc<dyn LlmClient>,
}

impl ResponseGenerator {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    #[instrument(skip(self, message_text, quote), fields(with_quote = quote.is_some()))]
    pub async fn generate(&self, message_text: &str, quote: Option<&MarketQuote>) -> Result<String> {
        let prompt = build_prompt(message_text, quote);
        let reply = self
            .llm
            .get_llm_response_with_messages(vec![ChatMessage::user(prompt)])
            .await
            .map_err(|e| BotError::Generation(e.to_string()))?;
        info!(reply_len = reply.len(), "Response received from completion endpoint");
        Ok(reply.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedLlm {
        reply: anyhow::Result<String>,
        prompts: Mutex<Vec<Vec<ChatMessage>>>,
    }

    #[async_trait]
    impl LlmClient for ScriptedLlm {
        async fn get_llm_response_with_messages(
            &self,
            messages: Vec<ChatMessage>,
        ) -> anyhow::Result<String> {
            self.prompts.lock().unwrap().push(messages);
            match &self.reply {
                Ok(s) => Ok(s.clone()),
                Err(e) => Err(anyhow::anyhow!("{}", e)),
            }
        }
    }

    #[test]
    fn test_build_prompt_without_quote() {
        assert_eq!(
            build_prompt("Is now a good time to buy?", None),
            "Respond to this message as an expert in finance and crypto trading: Is now a good time to buy?"
        );
    }

    #[test]
    fn test_build_prompt_with_quote() {
        let quote = MarketQuote {
            symbol: "ETH/USDT".to_string(),
            close_price: 3000.5,
        };
        let prompt = build_prompt("What is the price of ethereum?", Some(&quote));
        assert!(prompt.ends_with(
            "What is the price of ethereum? The current price for ETH/USDT is 3000.5 USD."
        ));
    }

    #[tokio::test]
    async fn test_generate_sends_one_user_message_and_trims() {
        let llm = Arc::new(ScriptedLlm {
            reply: Ok("\n  Inflation erodes purchasing power.  \n".to_string()),
            prompts: Mutex::new(Vec::new()),
        });
        let generator = ResponseGenerator::new(llm.clone());

        let reply = generator
            .generate("What do you think about inflation?", None)
            .await
            .unwrap();

        assert_eq!(reply, "Inflation erodes purchasing power.");
        let prompts = llm.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].len(), 1);
        assert_eq!(prompts[0][0].role, llm_client::MessageRole::User);
    }

    #[tokio::test]
    async fn test_generate_maps_errors() {
        let llm = Arc::new(ScriptedLlm {
            reply: Err(anyhow::anyhow!("rate limit exceeded")),
            prompts: Mutex::new(Vec::new()),
        });
        let generator = ResponseGenerator::new(llm);

        let err = generator.generate("hello", None).await.unwrap_err();

        assert!(matches!(err, BotError::Generation(ref m) if m.contains("rate limit exceeded")));
    }
}
