//! Price assistant: the branch between price queries and general questions.
//!
//! A price query resolves a ticker, fetches a quote and asks the model to answer with the
//! quote in the prompt. Unknown tickers get [`FALLBACK_REPLY`]; failed fetches get an apology
//! naming the pair. Anything else goes to the model without a quote.

use async_trait::async_trait;
use pricebot_core::{Handler, HandlerResponse, Message, Result};
use tracing::{debug, info, instrument};

use crate::context::AssistantContext;

pub const FALLBACK_REPLY: &str = "At this moment, I can't provide real-time data concerning that token. You can check a cryptocurrency exchange or financial news website for the latest price. If you have questions about crypto or finance in general, feel free to ask!";

const PRICE_KEYWORDS: [&str; 2] = ["price", "what is"];

/// Substring match on the lowercased content.
pub fn is_price_query(content: &str) -> bool {
    let lowered = content.to_lowercase();
    PRICE_KEYWORDS.iter().any(|k| lowered.contains(k))
}

fn fetch_apology(symbol: &str) -> String {
    format!("Sorry, I couldn't fetch data for {}.", symbol)
}

pub struct PriceAssistantHandler {
    ctx: AssistantContext,
}

impl PriceAssistantHandler {
    pub fn new(ctx: AssistantContext) -> Self {
        Self { ctx }
    }

    async fn answer_price_query(&self, content: &str) -> Result<String> {
        let Some(symbol) = self.ctx.resolver.resolve(content) else {
            info!("No known token in price query; sending fallback");
            return Ok(FALLBACK_REPLY.to_string());
        };
        info!(symbol = %symbol, "Resolved token symbol");

        match self.ctx.fetcher.fetch_quote(symbol).await {
            Ok(quote) => self.ctx.generator.generate(content, Some(&quote)).await,
            Err(e) => {
                debug!(error = %e, "Replying with fetch apology");
                Ok(fetch_apology(&e.symbol))
            }
        }
    }
}

#[async_trait]
impl Handler for PriceAssistantHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let content = message.content.as_str();
        let reply = if is_price_query(content) {
            self.answer_price_query(content).await?
        } else {
            self.ctx.generator.generate(content, None).await?
        };
        Ok(HandlerResponse::Reply(reply))
    }
}
