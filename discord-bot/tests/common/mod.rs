//! Hand-written mock collaborators for dispatcher tests: recording Bot, scripted LlmClient and a
//! fixed AuditLogSource.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use dbot_core::{
    Bot, Chat, DbotError, Embed, EventLog, GuildInfo, MemberSnapshot, Message, MessageDirection,
    Result, User,
};
use discord_bot::{build_handler_chain, BotComponents, Dispatcher};
use llm_client::LlmClient;
use member_events::{Actor, AnnouncementStyle, AuditAction, AuditEntry, AuditLogSource};
use persona::Persona;

pub const GUILD_ID: u64 = 900;
pub const LOG_CHANNEL_ID: u64 = 901;
pub const CHAT_CHANNEL_ID: u64 = 902;
pub const BOT_ID: u64 = 999;
pub const MODERATOR_ID: u64 = 7;

/// Everything the mock Bot was asked to send.
#[derive(Debug, Clone)]
pub enum Sent {
    Text { channel_id: u64, text: String },
    Embed { channel_id: u64, embed: Embed },
    Reply { message_id: u64, text: String },
}

/// Records outbound calls; knows which channels belong to which guild. While `fail_sends` is set,
/// every send returns [`DbotError::Send`] and is counted in `failed_sends` instead of recorded.
#[derive(Default)]
pub struct RecordingBot {
    pub sent: Mutex<Vec<Sent>>,
    pub channels: Vec<(u64, u64)>,
    pub fail_sends: AtomicBool,
    pub failed_sends: AtomicUsize,
}

impl RecordingBot {
    pub fn with_log_channel() -> Self {
        Self {
            channels: vec![(GUILD_ID, LOG_CHANNEL_ID), (GUILD_ID, CHAT_CHANNEL_ID)],
            ..Default::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_sends.store(failing, Ordering::SeqCst);
    }

    pub fn failed_sends(&self) -> usize {
        self.failed_sends.load(Ordering::SeqCst)
    }

    fn record(&self, sent: Sent) -> Result<()> {
        if self.fail_sends.load(Ordering::SeqCst) {
            self.failed_sends.fetch_add(1, Ordering::SeqCst);
            return Err(DbotError::Send("503 Service Unavailable".to_string()));
        }
        self.sent.lock().unwrap().push(sent);
        Ok(())
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn embeds(&self) -> Vec<Embed> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Embed { embed, .. } => Some(embed),
                _ => None,
            })
            .collect()
    }

    pub fn replies(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Reply { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.record(Sent::Text {
            channel_id: chat.id,
            text: text.to_string(),
        })
    }

    async fn send_embed(&self, chat: &Chat, embed: &Embed) -> Result<()> {
        self.record(Sent::Embed {
            channel_id: chat.id,
            embed: embed.clone(),
        })
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.record(Sent::Reply {
            message_id: message.id,
            text: text.to_string(),
        })
    }

    async fn guild_has_channel(&self, guild_id: u64, channel_id: u64) -> bool {
        self.channels.contains(&(guild_id, channel_id))
    }
}

/// Returns scripted replies in order (Err entries become provider failures); records prompts.
#[derive(Default)]
pub struct ScriptedLlm {
    pub replies: Mutex<VecDeque<std::result::Result<String, String>>>,
    pub prompts: Mutex<Vec<(String, String)>>,
}

impl ScriptedLlm {
    pub fn new(replies: Vec<std::result::Result<String, String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .map(|(_, p)| p.clone())
            .collect()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn get_llm_response(&self, system_instruction: &str, prompt: &str) -> anyhow::Result<String> {
        self.prompts
            .lock()
            .unwrap()
            .push((system_instruction.to_string(), prompt.to_string()));
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(e)) => Err(anyhow::anyhow!(e)),
            None => Err(anyhow::anyhow!("no scripted reply")),
        }
    }
}

/// Fixed audit window, or a lookup failure when `entries` is None. Applies the action filter the
/// way the audit log endpoint does and records each requested filter.
#[derive(Default)]
pub struct FixedAuditSource {
    pub entries: Option<Vec<AuditEntry>>,
    pub requested_actions: Mutex<Vec<Option<AuditAction>>>,
}

impl FixedAuditSource {
    pub fn new(entries: Option<Vec<AuditEntry>>) -> Self {
        Self {
            entries,
            ..Default::default()
        }
    }

    pub fn requested_actions(&self) -> Vec<Option<AuditAction>> {
        self.requested_actions.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditLogSource for FixedAuditSource {
    async fn recent_entries(
        &self,
        _guild_id: u64,
        _target_id: u64,
        action: Option<AuditAction>,
        _limit: u8,
    ) -> Result<Vec<AuditEntry>> {
        self.requested_actions.lock().unwrap().push(action);
        let entries = self
            .entries
            .clone()
            .ok_or_else(|| DbotError::AuditLookup("Missing Access".to_string()))?;
        Ok(entries
            .into_iter()
            .filter(|e| action.map_or(true, |a| e.action == a))
            .collect())
    }
}

pub fn audit_entry(target: u64, action: AuditAction, created_at: DateTime<Utc>) -> AuditEntry {
    AuditEntry {
        target_id: Some(target),
        actor: Some(Actor {
            id: MODERATOR_ID,
            display_name: Some("管理员".to_string()),
        }),
        action,
        created_at,
    }
}

pub fn guild() -> GuildInfo {
    GuildInfo {
        id: GUILD_ID,
        name: "测试服".to_string(),
        icon_url: None,
    }
}

pub fn member(id: u64, joined_days_ago: Option<i64>, observed_at: DateTime<Utc>) -> MemberSnapshot {
    MemberSnapshot {
        id,
        display_name: format!("member-{}", id),
        avatar_url: None,
        account_created_at: Utc.with_ymd_and_hms(2020, 5, 5, 5, 5, 5).unwrap(),
        joined_at: joined_days_ago.map(|d| observed_at - Duration::days(d)),
        guild_id: GUILD_ID,
        observed_at,
    }
}

pub fn chat_message(id: u64, content: &str, is_bot: bool) -> Message {
    Message {
        id,
        user: User {
            id: 123,
            name: "asker".to_string(),
            display_name: None,
            is_bot,
        },
        chat: Chat {
            id: CHAT_CHANNEL_ID,
            guild_id: Some(GUILD_ID),
        },
        content: content.to_string(),
        direction: MessageDirection::Incoming,
        created_at: Utc::now(),
        reply_to_message_id: None,
    }
}

pub fn bot_user() -> User {
    User {
        id: BOT_ID,
        name: "persona-bot".to_string(),
        display_name: None,
        is_bot: true,
    }
}

/// Test harness: the dispatcher plus handles on its mocks.
pub struct Harness {
    pub dispatcher: Dispatcher,
    pub bot: Arc<RecordingBot>,
    pub llm: Arc<ScriptedLlm>,
    pub audit: Arc<FixedAuditSource>,
}

pub struct HarnessOptions {
    pub audit_entries: Option<Vec<AuditEntry>>,
    pub replies: Vec<std::result::Result<String, String>>,
    pub log_channel_id: Option<u64>,
    pub style: AnnouncementStyle,
    pub max_history: usize,
    pub event_log: Arc<EventLog>,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            audit_entries: Some(Vec::new()),
            replies: Vec::new(),
            log_channel_id: Some(LOG_CHANNEL_ID),
            style: AnnouncementStyle::Embed,
            max_history: 10,
            event_log: Arc::new(EventLog::disabled()),
        }
    }
}

pub fn harness(options: HarnessOptions) -> Harness {
    let bot = Arc::new(RecordingBot::with_log_channel());
    let llm = Arc::new(ScriptedLlm::new(options.replies));
    let audit = Arc::new(FixedAuditSource::new(options.audit_entries));
    let components = BotComponents::new(
        bot.clone(),
        audit.clone(),
        llm.clone(),
        Persona::default(),
        options.max_history,
        options.event_log,
    );
    let chain = build_handler_chain(&components, "!");
    let dispatcher = Dispatcher::new(components, chain, options.log_channel_id, options.style);
    Harness {
        dispatcher,
        bot,
        llm,
        audit,
    }
}

/// Lines of the event log at `path`, without the timestamp prefix.
pub fn event_log_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(|l| l.splitn(2, "] ").nth(1).unwrap_or(l).to_string())
        .collect()
}
