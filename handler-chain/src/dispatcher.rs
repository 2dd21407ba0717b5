//! Per-message entry point: runs the chain and sends at most one reply to the originating chat.

use pricebot_core::{Bot, HandlerResponse, Message};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::HandlerChain;

/// Prefix of the reply sent when handling a message fails.
pub const ERROR_REPLY_PREFIX: &str = "An error occurred: ";

/// Chain plus reply sender. Stateless across messages; cheap to clone into per-message tasks.
#[derive(Clone)]
pub struct Dispatcher {
    chain: HandlerChain,
    bot: Arc<dyn Bot>,
}

impl Dispatcher {
    pub fn new(chain: HandlerChain, bot: Arc<dyn Bot>) -> Self {
        Self { chain, bot }
    }

    /// Handles one inbound message. Returns true iff a reply was sent.
    ///
    /// A `Reply` from the chain is sent as-is; any chain error is turned into a single
    /// `"An error occurred: ..."` reply. Filtered messages produce no reply.
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    pub async fn dispatch(&self, message: &Message) -> bool {
        let reply = match self.chain.handle(message).await {
            Ok(HandlerResponse::Reply(text)) => text,
            Ok(response) => {
                info!(response = ?response, "step: no reply for message");
                return false;
            }
            Err(e) => {
                error!(error = %e, "Handler chain failed");
                return self.send_error_reply(message, e.to_string()).await;
            }
        };

        match self.bot.reply_to(message, &reply).await {
            Ok(()) => {
                info!(reply_len = reply.len(), "step: reply sent");
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to send reply");
                self.send_error_reply(message, e.to_string()).await
            }
        }
    }

    async fn send_error_reply(&self, message: &Message, detail: String) -> bool {
        let text = format!("{}{}", ERROR_REPLY_PREFIX, detail);
        match self.bot.reply_to(message, &text).await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "Failed to send error reply");
                false
            }
        }
    }
}
