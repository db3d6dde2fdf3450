//! Gateway event handler: converts serenity events into [`BotEvent`]s for the [`Dispatcher`].
//!
//! The dispatcher needs serenity's Http and Cache, which only exist once the client is built, so it
//! is assembled from the first event's context and reused afterwards.

use std::sync::{Arc, OnceLock};

use chrono::Utc;
use dbot_core::{BotEvent, EventLog, ToCoreMessage, ToCoreUser};
use llm_client::LlmClient;
use serenity::all::{Context, EventHandler, GatewayIntents, GuildId, Member, Message, Ready, User};
use serenity::async_trait;
use tracing::{info, instrument};

use super::adapters::{guild_info, member_snapshot, DiscordMessageWrapper, DiscordUserWrapper};
use super::{DiscordBotAdapter, SerenityAuditLogSource};
use crate::components::{build_handler_chain, BotComponents};
use crate::config::BotConfig;
use crate::dispatcher::Dispatcher;

/// Events the bot subscribes to: messages with content, member removals and bans.
pub fn gateway_intents() -> GatewayIntents {
    GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MODERATION
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
}

/// serenity `EventHandler` owning the lazily built dispatcher.
pub struct DiscordEventHandler {
    config: BotConfig,
    llm_client: Arc<dyn LlmClient>,
    event_log: Arc<EventLog>,
    dispatcher: OnceLock<Arc<Dispatcher>>,
}

impl DiscordEventHandler {
    pub fn new(config: BotConfig, llm_client: Arc<dyn LlmClient>, event_log: Arc<EventLog>) -> Self {
        Self {
            config,
            llm_client,
            event_log,
            dispatcher: OnceLock::new(),
        }
    }

    fn dispatcher(&self, ctx: &Context) -> Arc<Dispatcher> {
        self.dispatcher
            .get_or_init(|| {
                let components = BotComponents::new(
                    Arc::new(DiscordBotAdapter::new(ctx.http.clone(), ctx.cache.clone())),
                    Arc::new(SerenityAuditLogSource::new(ctx.http.clone(), ctx.cache.clone())),
                    self.llm_client.clone(),
                    self.config.persona.clone(),
                    self.config.base.max_history,
                    self.event_log.clone(),
                );
                let chain = build_handler_chain(&components, &self.config.base.command_prefix);
                Arc::new(Dispatcher::new(
                    components,
                    chain,
                    self.config.base.log_channel_id,
                    self.config.base.announce_style,
                ))
            })
            .clone()
    }
}

#[async_trait]
impl EventHandler for DiscordEventHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        let me: &User = &ready.user;
        info!(guild_count = ready.guilds.len(), "Gateway session ready");
        self.dispatcher(&ctx)
            .dispatch(BotEvent::Ready {
                bot_user: DiscordUserWrapper(me).to_core(),
            })
            .await;
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let core_msg = DiscordMessageWrapper(&msg).to_core();
        self.dispatcher(&ctx)
            .dispatch(BotEvent::MessageReceived(core_msg))
            .await;
    }

    #[instrument(skip(self, ctx, banned_user), fields(user_id = banned_user.id.get()))]
    async fn guild_ban_addition(&self, ctx: Context, guild_id: GuildId, banned_user: User) {
        let observed_at = Utc::now();
        let cached = ctx
            .cache
            .member(guild_id, banned_user.id)
            .map(|m| Member::clone(&m));
        let member = member_snapshot(&banned_user, cached.as_ref(), guild_id, observed_at);
        let guild = guild_info(&ctx.cache, guild_id);
        self.dispatcher(&ctx)
            .dispatch(BotEvent::MemberBanned { guild, member })
            .await;
    }

    #[instrument(skip(self, ctx, user, member_data), fields(user_id = user.id.get()))]
    async fn guild_member_removal(
        &self,
        ctx: Context,
        guild_id: GuildId,
        user: User,
        member_data: Option<Member>,
    ) {
        let observed_at = Utc::now();
        let member = member_snapshot(&user, member_data.as_ref(), guild_id, observed_at);
        let guild = guild_info(&ctx.cache, guild_id);
        self.dispatcher(&ctx)
            .dispatch(BotEvent::MemberRemoved { guild, member })
            .await;
    }
}
