//! Conversion from serenity models to core types.

use chrono::{DateTime, Utc};
use dbot_core::{Chat, GuildInfo, MemberSnapshot, Message, MessageDirection, ToCoreMessage, ToCoreUser, User};
use serenity::all::{Cache, GuildId, Member};

/// Milliseconds between the Unix epoch and the platform epoch (2015-01-01).
const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

/// Creation time encoded in a snowflake id.
pub fn snowflake_time(id: u64) -> DateTime<Utc> {
    let millis = (id >> 22) + DISCORD_EPOCH_MS;
    DateTime::from_timestamp_millis(millis as i64).unwrap_or_default()
}

/// serenity user to core user.
pub struct DiscordUserWrapper<'a>(pub &'a serenity::all::User);

impl<'a> ToCoreUser for DiscordUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.get(),
            name: self.0.name.clone(),
            display_name: self.0.global_name.clone(),
            is_bot: self.0.bot,
        }
    }
}

/// serenity message to core message; the server nickname wins over the global name.
pub struct DiscordMessageWrapper<'a>(pub &'a serenity::all::Message);

impl<'a> ToCoreMessage for DiscordMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let msg = self.0;
        let mut user = DiscordUserWrapper(&msg.author).to_core();
        if let Some(nick) = msg.member.as_ref().and_then(|m| m.nick.clone()) {
            user.display_name = Some(nick);
        }
        Message {
            id: msg.id.get(),
            user,
            chat: Chat {
                id: msg.channel_id.get(),
                guild_id: msg.guild_id.map(|g| g.get()),
            },
            content: msg.content.clone(),
            direction: MessageDirection::Incoming,
            created_at: DateTime::from_timestamp(msg.timestamp.unix_timestamp(), 0)
                .unwrap_or_else(Utc::now),
            reply_to_message_id: msg
                .message_reference
                .as_ref()
                .and_then(|r| r.message_id)
                .map(|id| id.get()),
        }
    }
}

/// Guild name and icon from the cache; falls back to the id when the guild is not cached.
pub fn guild_info(cache: &Cache, guild_id: GuildId) -> GuildInfo {
    match cache.guild(guild_id) {
        Some(guild) => GuildInfo {
            id: guild_id.get(),
            name: guild.name.clone(),
            icon_url: guild.icon_url(),
        },
        None => GuildInfo {
            id: guild_id.get(),
            name: guild_id.get().to_string(),
            icon_url: None,
        },
    }
}

/// Snapshot of a departing member; `member` carries the join time and server nickname when known.
pub fn member_snapshot(
    user: &serenity::all::User,
    member: Option<&Member>,
    guild_id: GuildId,
    observed_at: DateTime<Utc>,
) -> MemberSnapshot {
    let display_name = match member {
        Some(m) => m.display_name().to_string(),
        None => user.global_name.clone().unwrap_or_else(|| user.name.clone()),
    };
    MemberSnapshot {
        id: user.id.get(),
        display_name,
        avatar_url: Some(member.map(|m| m.face()).unwrap_or_else(|| user.face())),
        account_created_at: snowflake_time(user.id.get()),
        joined_at: member
            .and_then(|m| m.joined_at)
            .and_then(|t| DateTime::from_timestamp(t.unix_timestamp(), 0)),
        guild_id: guild_id.get(),
        observed_at,
    }
}
