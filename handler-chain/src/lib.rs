//! # Handler chain
//!
//! Runs a sequence of filters and handlers for each message. Any filter can reject the message
//! (no reply); the first handler that returns Stop or Reply ends handler execution.
//! [`Dispatcher`] wraps a chain with the reply sender and is the per-message entry point.

mod dispatcher;

pub use dispatcher::{Dispatcher, ERROR_REPLY_PREFIX};

use pricebot_core::{FilterDecision, Handler, HandlerResponse, Message, MessageFilter, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Filters run in order, then handlers run in order.
#[derive(Clone, Default)]
pub struct HandlerChain {
    filters: Vec<Arc<dyn MessageFilter>>,
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain (no filters, no handlers).
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a filter.
    pub fn add_filter(mut self, filter: Arc<dyn MessageFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Appends a handler (runs in order; first Stop/Reply ends handler phase).
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Runs the filters, then the handlers. Returns Stop if a filter rejected the message,
    /// the first Stop or Reply from a handler, or Continue when every handler passed.
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        info!(message_id = %message.id, "step: handler_chain started");

        for filter in &self.filters {
            let filter_name = std::any::type_name_of_val(filter.as_ref());
            match filter.check(message).await? {
                FilterDecision::Accept => {
                    debug!(filter = %filter_name, "step: filter accepted");
                }
                FilterDecision::Reject(reason) => {
                    info!(
                        filter = %filter_name,
                        reason = reason,
                        "step: filter rejected message, chain stopped"
                    );
                    return Ok(HandlerResponse::Stop);
                }
            }
        }

        for handler in &self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());
            let response = handler.handle(message).await?;
            let (response_type, reply_len) = match &response {
                HandlerResponse::Continue => ("Continue", None),
                HandlerResponse::Stop => ("Stop", None),
                HandlerResponse::Reply(s) => ("Reply", Some(s.len())),
            };
            info!(
                handler = %handler_name,
                response_type = %response_type,
                reply_len = ?reply_len,
                "step: handler done"
            );

            if response != HandlerResponse::Continue {
                return Ok(response);
            }
        }

        Ok(HandlerResponse::Continue)
    }
}
