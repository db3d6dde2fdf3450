//! Event dispatch: one `match` over [`BotEvent`], independent of the gateway library.
//!
//! Chat messages go through the handler chain. Ban notifications are announced with the moderator
//! taken from the audit window; removal notifications are classified first, and a removal caused by
//! a ban is not announced again. Every membership event leaves `[EVENT]` plus an outcome line
//! (`[BAN]`/`[KICK]`/`[LEAVE]`, `[INFO]`, `[WARN]` or `[ERROR]`) in the event log. Nothing here
//! returns an error: failures are logged and dropped.

use chrono::Utc;
use dbot_core::{Announcement, BotEvent, BotIdentity, Chat, GuildInfo, MemberSnapshot, Message, User};
use handler_chain::HandlerChain;
use member_events::{
    classify, compose, find_actor, removal_announcement, try_fetch_window, AnnouncementStyle,
    AuditAction, AuditEntry, Classification,
};
use tracing::{debug, error, info, instrument, warn};

use crate::components::BotComponents;

/// Routes every gateway event; shared across event tasks.
pub struct Dispatcher {
    components: BotComponents,
    chain: HandlerChain,
    log_channel_id: Option<u64>,
    style: AnnouncementStyle,
}

impl Dispatcher {
    pub fn new(
        components: BotComponents,
        chain: HandlerChain,
        log_channel_id: Option<u64>,
        style: AnnouncementStyle,
    ) -> Self {
        if log_channel_id.is_none() {
            warn!("LOG_CHANNEL_ID not set; membership announcements are disabled");
        }
        Self {
            components,
            chain,
            log_channel_id,
            style,
        }
    }

    pub fn components(&self) -> &BotComponents {
        &self.components
    }

    #[instrument(skip(self, event), fields(kind = event.kind()))]
    pub async fn dispatch(&self, event: BotEvent) {
        match event {
            BotEvent::Ready { bot_user } => self.on_ready(bot_user).await,
            BotEvent::MessageReceived(message) => self.on_message(message).await,
            BotEvent::MemberBanned { guild, member } => self.on_member_banned(guild, member).await,
            BotEvent::MemberRemoved { guild, member } => self.on_member_removed(guild, member).await,
        }
    }

    async fn on_ready(&self, bot_user: User) {
        info!(
            bot_id = bot_user.id,
            bot_name = %bot_user.name,
            persona = %self.components.persona.name,
            "Bot is ready"
        );
        self.components.event_log.append(&format!(
            "[READY] logged in as {} ({}) with persona {}",
            bot_user.name, bot_user.id, self.components.persona.name
        ));
        *self.components.identity.write().await = Some(BotIdentity {
            id: bot_user.id,
            name: bot_user.name,
        });
    }

    async fn on_message(&self, message: Message) {
        if message.user.is_bot {
            debug!(user_id = message.user.id, "Ignoring bot-authored message");
            return;
        }
        if let Err(e) = self.chain.handle(&message).await {
            error!(error = %e, user_id = message.user.id, "Handler chain failed");
        }
    }

    /// The configured log channel, if it belongs to `member`'s guild. A miss is written to the event log.
    async fn resolve_log_channel(&self, kind: &str, member: &MemberSnapshot) -> Option<Chat> {
        let guild_id = member.guild_id;
        let resolved = match self.log_channel_id {
            None => "no log channel configured".to_string(),
            Some(channel_id) => {
                if self.components.bot.guild_has_channel(guild_id, channel_id).await {
                    return Some(Chat {
                        id: channel_id,
                        guild_id: Some(guild_id),
                    });
                }
                format!("log channel {} not in guild {}", channel_id, guild_id)
            }
        };
        debug!(guild_id, reason = %resolved, "Skipping announcement");
        self.components.event_log.append(&format!(
            "[WARN] {}; {} of {} ({}) not announced",
            resolved, kind, member.display_name, member.id
        ));
        None
    }

    fn log_fired(&self, kind: &str, member: &MemberSnapshot) {
        self.components.event_log.append(&format!(
            "[EVENT] {} fired for {} ({}) in guild {}",
            kind, member.display_name, member.id, member.guild_id
        ));
    }

    /// Audit window with the degrade policy; a failed lookup is also written to the event log.
    async fn audit_window(&self, member: &MemberSnapshot, action: Option<AuditAction>) -> Vec<AuditEntry> {
        match try_fetch_window(self.components.audit_source.as_ref(), member, action).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    error = %e,
                    guild_id = member.guild_id,
                    member_id = member.id,
                    "Audit log lookup failed; treating as no match"
                );
                self.components.event_log.append(&format!(
                    "[ERROR] audit lookup for {} ({}) failed: {}",
                    member.display_name, member.id, e
                ));
                Vec::new()
            }
        }
    }

    async fn on_member_banned(&self, guild: GuildInfo, member: MemberSnapshot) {
        self.log_fired("ban", &member);
        let Some(chat) = self.resolve_log_channel("ban", &member).await else {
            return;
        };
        let entries = self.audit_window(&member, Some(AuditAction::Ban)).await;
        let actor = find_actor(member.id, member.observed_at, &entries, AuditAction::Ban);
        let classification = Classification::Banned(actor);
        let announcement = compose(
            &self.components.persona,
            self.style,
            &classification,
            &member,
            &guild,
            Utc::now(),
        );
        self.announce(&chat, &announcement, &classification, &member).await;
    }

    async fn on_member_removed(&self, guild: GuildInfo, member: MemberSnapshot) {
        self.log_fired("remove", &member);
        let Some(chat) = self.resolve_log_channel("removal", &member).await else {
            return;
        };
        let entries = self.audit_window(&member, None).await;
        let classification = classify(member.id, member.observed_at, &entries);
        let Some(announcement) = removal_announcement(
            &self.components.persona,
            self.style,
            &classification,
            &member,
            &guild,
            Utc::now(),
        ) else {
            info!(
                guild_id = guild.id,
                member_id = member.id,
                "Removal caused by a ban; already announced"
            );
            self.components.event_log.append(&format!(
                "[INFO] {} ({}) left due to BAN; already announced",
                member.display_name, member.id
            ));
            return;
        };
        self.announce(&chat, &announcement, &classification, &member).await;
    }

    async fn announce(
        &self,
        chat: &Chat,
        announcement: &Announcement,
        classification: &Classification,
        member: &MemberSnapshot,
    ) {
        info!(
            kind = classification.kind(),
            guild_id = member.guild_id,
            member_id = member.id,
            channel_id = chat.id,
            "Announcing membership event"
        );
        let moderator = classification
            .actor()
            .map(|a| a.label())
            .unwrap_or_else(|| "-".to_string());
        self.components.event_log.append(&format!(
            "[{}] {} ({}) in guild {} by {}",
            classification.kind().to_uppercase(),
            member.display_name,
            member.id,
            member.guild_id,
            moderator
        ));
        if let Err(e) = self.components.bot.send_announcement(chat, announcement).await {
            error!(error = %e, channel_id = chat.id, "Failed to send announcement");
            self.components.event_log.append(&format!(
                "[ERROR] failed to send {} announcement to channel {}: {}",
                classification.kind(),
                chat.id,
                e
            ));
        }
    }
}
