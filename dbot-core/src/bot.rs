//! Bot abstraction for outbound delivery.
//!
//! [`Bot`] trait is transport-agnostic; the serenity implementation lives in `discord-bot`.
//! Tests substitute a recording implementation.

use crate::embed::{Announcement, Embed};
use crate::error::Result;
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// Maximum characters in a single Discord message.
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;

/// Outbound collaborator: sends text, embeds and replies, and answers channel-membership lookups.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given channel.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a structured embed to the given channel.
    async fn send_embed(&self, chat: &Chat, embed: &Embed) -> Result<()>;
    /// Replies to the given message in its channel.
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Whether `channel_id` belongs to the guild; used to resolve the announcement channel.
    async fn guild_has_channel(&self, guild_id: u64, channel_id: u64) -> bool;

    /// Sends either announcement variant.
    async fn send_announcement(&self, chat: &Chat, announcement: &Announcement) -> Result<()> {
        match announcement {
            Announcement::Text(text) => self.send_message(chat, text).await,
            Announcement::Embed(embed) => self.send_embed(chat, embed).await,
        }
    }
}

/// Splits `text` into chunks of at most `limit` characters, on char boundaries.
/// Empty input yields no chunks.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0;
    for ch in text.chars() {
        if count == limit {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(ch);
        count += 1;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
