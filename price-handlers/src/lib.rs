//! # price-handlers
//!
//! The handlers and filters behind the price bot's dispatcher:
//!
//! - [`SelfMessageFilter`], [`CommandFilter`], [`ChannelFilter`]: which messages get a dynamic reply.
//! - [`PriceAssistantHandler`]: price query vs general query branching.
//! - [`ResponseGenerator`]: prompt construction and completion call.

mod assistant;
mod commands;
mod context;
mod filters;
mod generator;

pub use assistant::{is_price_query, PriceAssistantHandler, FALLBACK_REPLY};
pub use commands::{CommandProcessor, NoopCommandProcessor};
pub use context::AssistantContext;
pub use filters::{ChannelFilter, CommandFilter, SelfMessageFilter, DEFAULT_COMMAND_PREFIX};
pub use generator::{build_prompt, ResponseGenerator};
