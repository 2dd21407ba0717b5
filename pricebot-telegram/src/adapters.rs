//! Adapters from Telegram (teloxide) types to pricebot_core types.

use pricebot_core::{Chat, Message, ToCoreMessage, ToCoreUser, User};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            is_bot: self.0.is_bot,
        }
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`].
/// Private chats count as direct messages; content is the text, or the caption for media.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let msg = self.0;
        Message {
            id: msg.id.to_string(),
            user: msg
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or(User {
                    id: 0,
                    username: None,
                    first_name: None,
                    is_bot: false,
                }),
            chat: Chat {
                id: msg.chat.id.0,
                is_direct: msg.chat.is_private(),
                title: msg.chat.title().map(str::to_string),
            },
            content: msg.text().or_else(|| msg.caption()).unwrap_or("").to_string(),
            created_at: msg.date,
        }
    }
}
