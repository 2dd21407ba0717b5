//! # pricebot-core
//!
//! Core types and traits for the price bot: [`Bot`], [`MessageFilter`], [`Handler`], message and user types,
//! error types and tracing initialization. Transport-agnostic; used by handler-chain, price-handlers and pricebot-telegram.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{BotError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, FilterDecision, Handler, HandlerResponse, Message, MessageFilter, ToCoreMessage,
    ToCoreUser, User,
};
