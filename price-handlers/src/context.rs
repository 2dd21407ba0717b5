//! Collaborators shared by the assistant handler.

use market_data::{MarketDataFetcher, SymbolResolver};
use std::sync::Arc;

use crate::generator::ResponseGenerator;

#[derive(Clone)]
pub struct AssistantContext {
    pub resolver: Arc<SymbolResolver>,
    pub fetcher: Arc<MarketDataFetcher>,
    pub generator: Arc<ResponseGenerator>,
}

impl AssistantContext {
    pub fn new(
        resolver: Arc<SymbolResolver>,
        fetcher: Arc<MarketDataFetcher>,
        generator: Arc<ResponseGenerator>,
    ) -> Self {
        Self {
            resolver,
            fetcher,
            generator,
        }
    }
}
