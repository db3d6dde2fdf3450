//! Base config: Discord connection, logging, announcement channel and chat behavior. Loaded from env.

use anyhow::{Context, Result};
use member_events::AnnouncementStyle;
use std::env;

pub const DEFAULT_LOG_FILE: &str = "logs/discord-bot.log";
pub const DEFAULT_EVENT_LOG_FILE: &str = "logs/events.log";
pub const DEFAULT_COMMAND_PREFIX: &str = "!";

/// Base config: everything that is not LLM or persona.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// DISCORD_BOT_TOKEN
    pub bot_token: String,
    /// LOG_CHANNEL_ID; announcements are disabled when unset
    pub log_channel_id: Option<u64>,
    /// MAX_HISTORY, conversation buffer capacity in turns
    pub max_history: usize,
    /// COMMAND_PREFIX
    pub command_prefix: String,
    /// ANNOUNCE_STYLE (`embed` | `text`)
    pub announce_style: AnnouncementStyle,
    /// LOG_FILE, tracing output
    pub log_file: String,
    /// EVENT_LOG_FILE, append-only event log
    pub event_log_file: String,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides DISCORD_BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("DISCORD_BOT_TOKEN").context("DISCORD_BOT_TOKEN not set")?,
        };
        let log_channel_id = match env::var("LOG_CHANNEL_ID") {
            Ok(raw) if !raw.trim().is_empty() => {
                let id: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("LOG_CHANNEL_ID is not a channel id: {}", raw))?;
                Some(id)
            }
            _ => None,
        };
        let max_history = match env::var("MAX_HISTORY") {
            Ok(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse()
                .with_context(|| format!("MAX_HISTORY is not a turn count: {}", raw))?,
            _ => conversation::DEFAULT_HISTORY_CAPACITY,
        };
        let command_prefix =
            env::var("COMMAND_PREFIX").unwrap_or_else(|_| DEFAULT_COMMAND_PREFIX.to_string());
        let announce_style = match env::var("ANNOUNCE_STYLE") {
            Ok(raw) => raw.parse().map_err(anyhow::Error::msg)?,
            Err(_) => AnnouncementStyle::default(),
        };
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        let event_log_file =
            env::var("EVENT_LOG_FILE").unwrap_or_else(|_| DEFAULT_EVENT_LOG_FILE.to_string());

        Ok(Self {
            bot_token,
            log_channel_id,
            max_history,
            command_prefix,
            announce_style,
            log_file,
            event_log_file,
        })
    }

    /// Validate config (non-empty token and prefix, non-zero ids and capacity).
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("DISCORD_BOT_TOKEN is empty");
        }
        if self.command_prefix.is_empty() {
            anyhow::bail!("COMMAND_PREFIX must not be empty");
        }
        if self.log_channel_id == Some(0) {
            anyhow::bail!("LOG_CHANNEL_ID must not be 0");
        }
        if self.max_history == 0 {
            anyhow::bail!("MAX_HISTORY must be at least 1");
        }
        Ok(())
    }
}
