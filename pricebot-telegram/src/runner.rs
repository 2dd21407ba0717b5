//! REPL: converts each teloxide message to a core message and hands it to the dispatcher.

use anyhow::Result;
use handler_chain::Dispatcher;
use pricebot_core::ToCoreMessage;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{info, instrument, warn};

use super::adapters::TelegramMessageWrapper;

/// Starts the REPL. Before polling, getMe fills `bot_user_id` so the bot can skip its own messages.
/// Each message is dispatched on its own task so a slow completion never blocks polling.
#[instrument(skip(bot, dispatcher, bot_user_id))]
pub async fn run_repl(
    bot: teloxide::Bot,
    dispatcher: Dispatcher,
    bot_user_id: Arc<tokio::sync::RwLock<Option<i64>>>,
) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => {
            *bot_user_id.write().await = Some(me.user.id.0 as i64);
            info!(
                user_id = me.user.id.0,
                username = ?me.user.username,
                "Logged in"
            );
        }
        Err(e) => warn!(error = %e, "getMe failed; own messages cannot be recognised"),
    }

    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let dispatcher = dispatcher.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();
            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                is_direct = core_msg.chat.is_direct,
                message_content = %core_msg.content,
                "Received message"
            );

            tokio::spawn(async move {
                let replied = dispatcher.dispatch(&core_msg).await;
                info!(
                    message_id = %core_msg.id,
                    replied = replied,
                    "step: message processed"
                );
            });

            Ok(())
        }
    })
    .await;

    Ok(())
}
