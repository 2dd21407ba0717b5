//! Builds the dispatcher from its collaborators.

use anyhow::Result;
use handler_chain::{Dispatcher, HandlerChain};
use llm_client::{LlmClient, OpenAILlmClient};
use market_data::{BinanceClient, CryptoSymbolMap, ExchangeClient, MarketDataFetcher, SymbolResolver};
use price_handlers::{
    AssistantContext, ChannelFilter, CommandFilter, CommandProcessor, NoopCommandProcessor,
    PriceAssistantHandler, ResponseGenerator, SelfMessageFilter,
};
use pricebot_core::Bot;
use pricebot_telegram::TelegramBotAdapter;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::{BotConfig, DispatchSettings};

/// Every collaborator the dispatcher talks to. Tests build this from in-memory fakes.
#[derive(Clone)]
pub struct DispatchComponents {
    pub bot: Arc<dyn Bot>,
    pub exchange: Arc<dyn ExchangeClient>,
    pub llm: Arc<dyn LlmClient>,
    pub commands: Arc<dyn CommandProcessor>,
    /// Filled from getMe once the bot has logged in.
    pub bot_user_id: Arc<RwLock<Option<i64>>>,
}

impl DispatchComponents {
    /// Production collaborators: Telegram, Binance and the OpenAI-compatible endpoint.
    pub fn from_config(config: &BotConfig, teloxide_bot: teloxide::Bot) -> Result<Self> {
        let llm = OpenAILlmClient::from_config(&config.llm);
        info!(
            model = %llm.model(),
            max_tokens = llm.max_tokens(),
            exchange_url = %config.exchange.base_url,
            "Building dispatch components"
        );
        Ok(Self {
            bot: Arc::new(TelegramBotAdapter::new(teloxide_bot)),
            exchange: Arc::new(BinanceClient::from_config(&config.exchange)),
            llm: Arc::new(llm),
            commands: Arc::new(NoopCommandProcessor::new()),
            bot_user_id: Arc::new(RwLock::new(None)),
        })
    }
}

/// Filter order: own messages, then commands, then the chat allow-list.
pub fn build_dispatcher(settings: &DispatchSettings, components: DispatchComponents) -> Dispatcher {
    let resolver = Arc::new(SymbolResolver::new(&CryptoSymbolMap::default()));
    let ctx = AssistantContext::new(
        resolver,
        Arc::new(MarketDataFetcher::new(components.exchange)),
        Arc::new(ResponseGenerator::new(components.llm)),
    );

    let chain = HandlerChain::new()
        .add_filter(Arc::new(SelfMessageFilter::new(components.bot_user_id)))
        .add_filter(Arc::new(CommandFilter::new(
            settings.command_prefix.clone(),
            components.commands,
        )))
        .add_filter(Arc::new(ChannelFilter::new(settings.allowed_chat_id)))
        .add_handler(Arc::new(PriceAssistantHandler::new(ctx)));

    Dispatcher::new(chain, components.bot)
}
