//! Implements [`dbot_core::Bot`] over serenity's HTTP client. Tests substitute another Bot impl.

use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{split_message, Bot as CoreBot, Chat, DbotError, Embed, Message, Result, DISCORD_MESSAGE_LIMIT};
use serenity::all::{
    Cache, Channel, ChannelId, CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter, CreateMessage,
    GuildId, Http, MessageId, Timestamp,
};
use tracing::{debug, instrument};

/// Thin wrapper around serenity's Http and Cache that implements core's Bot trait.
#[derive(Clone)]
pub struct DiscordBotAdapter {
    http: Arc<Http>,
    cache: Arc<Cache>,
}

fn channel(id: u64) -> Result<ChannelId> {
    if id == 0 {
        return Err(DbotError::Send("invalid channel id 0".to_string()));
    }
    Ok(ChannelId::new(id))
}

fn to_create_embed(embed: &Embed) -> CreateEmbed {
    let mut out = CreateEmbed::new()
        .title(embed.title.clone())
        .description(embed.description.clone())
        .color(embed.color);
    if let Some(author) = &embed.author {
        let mut builder = CreateEmbedAuthor::new(author.name.clone());
        if let Some(icon) = &author.icon_url {
            builder = builder.icon_url(icon.clone());
        }
        out = out.author(builder);
    }
    if let Some(url) = &embed.thumbnail_url {
        out = out.thumbnail(url.clone());
    }
    if let Some(url) = &embed.image_url {
        out = out.image(url.clone());
    }
    if let Some(footer) = &embed.footer {
        out = out.footer(CreateEmbedFooter::new(footer.clone()));
    }
    if let Ok(ts) = Timestamp::from_unix_timestamp(embed.timestamp.timestamp()) {
        out = out.timestamp(ts);
    }
    out
}

impl DiscordBotAdapter {
    pub fn new(http: Arc<Http>, cache: Arc<Cache>) -> Self {
        Self { http, cache }
    }

    async fn send(&self, channel_id: ChannelId, builder: CreateMessage) -> Result<()> {
        channel_id
            .send_message(&self.http, builder)
            .await
            .map_err(|e| DbotError::Send(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl CoreBot for DiscordBotAdapter {
    #[instrument(skip(self, text), fields(channel_id = chat.id))]
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        let channel_id = channel(chat.id)?;
        for chunk in split_message(text, DISCORD_MESSAGE_LIMIT) {
            self.send(channel_id, CreateMessage::new().content(chunk)).await?;
        }
        Ok(())
    }

    async fn send_embed(&self, chat: &Chat, embed: &Embed) -> Result<()> {
        let channel_id = channel(chat.id)?;
        self.send(channel_id, CreateMessage::new().embed(to_create_embed(embed)))
            .await
    }

    /// First chunk references the original message; any overflow follows as plain messages.
    #[instrument(skip(self, message, text), fields(message_id = message.id))]
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        let channel_id = channel(message.chat.id)?;
        let reference = (message.id != 0).then(|| MessageId::new(message.id));
        for (i, chunk) in split_message(text, DISCORD_MESSAGE_LIMIT).into_iter().enumerate() {
            let mut builder = CreateMessage::new().content(chunk);
            if let (0, Some(message_id)) = (i, reference) {
                builder = builder.reference_message((channel_id, message_id));
            }
            self.send(channel_id, builder).await?;
        }
        Ok(())
    }

    async fn guild_has_channel(&self, guild_id: u64, channel_id: u64) -> bool {
        if guild_id == 0 || channel_id == 0 {
            return false;
        }
        let (guild_id, channel_id) = (GuildId::new(guild_id), ChannelId::new(channel_id));
        if let Some(found) = self
            .cache
            .guild(guild_id)
            .map(|g| g.channels.contains_key(&channel_id))
        {
            return found;
        }
        debug!(guild_id = guild_id.get(), "Guild not cached; resolving channel over HTTP");
        match self.http.get_channel(channel_id).await {
            Ok(Channel::Guild(c)) => c.guild_id == guild_id,
            _ => false,
        }
    }
}
