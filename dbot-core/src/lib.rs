//! # dbot-core
//!
//! Core types and traits for the Discord bot: [`Bot`], [`Handler`], message, member and embed types,
//! the [`BotEvent`] enum the dispatcher matches on, the error taxonomy, tracing initialization and
//! the append-only [`EventLog`]. Transport-agnostic; the serenity adapter lives in `discord-bot`.

pub mod bot;
pub mod embed;
pub mod error;
pub mod event;
pub mod event_log;
pub mod logger;
pub mod types;

pub use bot::{split_message, Bot, DISCORD_MESSAGE_LIMIT};
pub use embed::{Announcement, Embed, EmbedAuthor};
pub use error::{DbotError, HandlerError, Result};
pub use event::{format_utc, BotEvent, GuildInfo, MemberSnapshot};
pub use event_log::EventLog;
pub use logger::init_tracing;
pub use types::{
    mention_of, BotIdentity, Chat, Handler, HandlerResponse, Message, MessageDirection, ToCoreMessage,
    ToCoreUser, User,
};
