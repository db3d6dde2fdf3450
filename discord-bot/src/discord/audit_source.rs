//! Moderation-log source backed by the guild audit log endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{DbotError, Result};
use member_events::{Actor, AuditAction, AuditEntry, AuditLogSource};
use serenity::all::{Cache, GuildId, Http};
use serenity::model::guild::audit_log::{Action, AuditLogEntry, MemberAction};
use tracing::instrument;

use super::adapters::snowflake_time;

/// Reads recent audit log entries over HTTP; moderator names come from the cache when present.
pub struct SerenityAuditLogSource {
    http: Arc<Http>,
    cache: Arc<Cache>,
}

impl SerenityAuditLogSource {
    pub fn new(http: Arc<Http>, cache: Arc<Cache>) -> Self {
        Self { http, cache }
    }

    fn to_entry(&self, entry: &AuditLogEntry) -> AuditEntry {
        let display_name = self
            .cache
            .user(entry.user_id)
            .map(|u| u.global_name.clone().unwrap_or_else(|| u.name.clone()));
        AuditEntry {
            target_id: entry.target_id.map(|t| t.get()),
            actor: Some(Actor {
                id: entry.user_id.get(),
                display_name,
            }),
            action: map_action(&entry.action),
            created_at: snowflake_time(entry.id.get()),
        }
    }
}

fn map_action(action: &Action) -> AuditAction {
    match action {
        Action::Member(MemberAction::Kick) => AuditAction::Kick,
        Action::Member(MemberAction::BanAdd) => AuditAction::Ban,
        _ => AuditAction::Other,
    }
}

/// Audit log `action_type` filter for a domain action; `Other` has no single counterpart.
fn action_filter(action: AuditAction) -> Option<Action> {
    match action {
        AuditAction::Ban => Some(Action::Member(MemberAction::BanAdd)),
        AuditAction::Kick => Some(Action::Member(MemberAction::Kick)),
        AuditAction::Other => None,
    }
}

#[async_trait]
impl AuditLogSource for SerenityAuditLogSource {
    #[instrument(skip(self))]
    async fn recent_entries(
        &self,
        guild_id: u64,
        _target_id: u64,
        action: Option<AuditAction>,
        limit: u8,
    ) -> Result<Vec<AuditEntry>> {
        if guild_id == 0 {
            return Err(DbotError::AuditLookup("invalid guild id 0".to_string()));
        }
        let action_type = action.and_then(action_filter);
        let logs = GuildId::new(guild_id)
            .audit_logs(&self.http, action_type, None, None, Some(limit))
            .await
            .map_err(|e| DbotError::AuditLookup(e.to_string()))?;
        Ok(logs.entries.iter().map(|e| self.to_entry(e)).collect())
    }
}
