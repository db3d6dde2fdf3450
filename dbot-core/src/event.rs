//! Platform events the dispatcher routes, and the snapshots they carry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{mention_of, Message, User};

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS UTC`.
pub fn format_utc(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Guild (server) identity used for the announcement author line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildInfo {
    pub id: u64,
    pub name: String,
    pub icon_url: Option<String>,
}

/// Immutable snapshot of a member taken when a membership event is observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSnapshot {
    pub id: u64,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub account_created_at: DateTime<Utc>,
    /// None when the member was not cached (e.g. banned without ever being seen).
    pub joined_at: Option<DateTime<Utc>>,
    pub guild_id: u64,
    pub observed_at: DateTime<Utc>,
}

impl MemberSnapshot {
    pub fn mention(&self) -> String {
        mention_of(self.id)
    }

    /// Whole days between joining and `now`; None when the join time is unknown.
    pub fn days_in_server(&self, now: DateTime<Utc>) -> Option<i64> {
        self.joined_at.map(|joined| (now - joined).num_days())
    }
}

/// Tagged event variants delivered by the platform adapter.
#[derive(Debug, Clone)]
pub enum BotEvent {
    /// Gateway session is ready; carries the bot's own user.
    Ready { bot_user: User },
    /// A chat message was posted in a channel the bot can read.
    MessageReceived(Message),
    /// A member was banned from the guild.
    MemberBanned {
        guild: GuildInfo,
        member: MemberSnapshot,
    },
    /// A member left the guild (voluntarily, kicked, or as a side effect of a ban).
    MemberRemoved {
        guild: GuildInfo,
        member: MemberSnapshot,
    },
}

impl BotEvent {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            BotEvent::Ready { .. } => "ready",
            BotEvent::MessageReceived(_) => "message_received",
            BotEvent::MemberBanned { .. } => "member_banned",
            BotEvent::MemberRemoved { .. } => "member_removed",
        }
    }
}
