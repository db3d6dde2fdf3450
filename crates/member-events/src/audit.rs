//! Audit correlation: decide whether a departure was a ban, a kick or a voluntary leave.
//!
//! Moderation-log entries and removal notifications arrive separately and unordered, so the link
//! between them is a heuristic: an entry targeting the same member no older than
//! [`STALENESS_THRESHOLD_SECS`] at observation time is taken as the cause. Entries are scanned in
//! the order the source returns them (most recent first); the first ban or kick entry wins, even
//! when the other kind also matches further down.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dbot_core::{mention_of, MemberSnapshot, Result};
use tracing::{debug, warn};

/// Maximum age of an entry still considered the cause of a departure.
pub const STALENESS_THRESHOLD_SECS: i64 = 10;

/// Number of recent entries requested from the moderation log.
pub const AUDIT_WINDOW: u8 = 6;

/// Moderation action kind, reduced to what classification needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Ban,
    Kick,
    Other,
}

/// The moderator behind an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: u64,
    pub display_name: Option<String>,
}

impl Actor {
    pub fn mention(&self) -> String {
        mention_of(self.id)
    }

    /// Display name when known, otherwise the raw id (footers cannot render mentions).
    pub fn label(&self) -> String {
        self.display_name
            .clone()
            .unwrap_or_else(|| self.id.to_string())
    }
}

/// One moderation-log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub target_id: Option<u64>,
    pub actor: Option<Actor>,
    pub action: AuditAction,
    pub created_at: DateTime<Utc>,
}

/// Why a member is no longer in the guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Banned(Option<Actor>),
    Kicked(Option<Actor>),
    Left,
}

impl Classification {
    pub fn kind(&self) -> &'static str {
        match self {
            Classification::Banned(_) => "ban",
            Classification::Kicked(_) => "kick",
            Classification::Left => "leave",
        }
    }

    pub fn actor(&self) -> Option<&Actor> {
        match self {
            Classification::Banned(actor) | Classification::Kicked(actor) => actor.as_ref(),
            Classification::Left => None,
        }
    }
}

/// Read access to the moderation log.
#[async_trait]
pub trait AuditLogSource: Send + Sync {
    /// Up to `limit` most recent entries of the guild, most recent first, restricted to `action`
    /// when given. `target_id` is a hint; implementations may return entries for other targets.
    async fn recent_entries(
        &self,
        guild_id: u64,
        target_id: u64,
        action: Option<AuditAction>,
        limit: u8,
    ) -> Result<Vec<AuditEntry>>;
}

fn is_fresh(entry: &AuditEntry, observed_at: DateTime<Utc>) -> bool {
    observed_at - entry.created_at <= Duration::seconds(STALENESS_THRESHOLD_SECS)
}

fn targets(entry: &AuditEntry, subject_id: u64) -> bool {
    entry.target_id == Some(subject_id)
}

/// Moderator of the first fresh entry targeting `subject_id` with the given action.
pub fn find_actor(
    subject_id: u64,
    observed_at: DateTime<Utc>,
    entries: &[AuditEntry],
    action: AuditAction,
) -> Option<Actor> {
    entries
        .iter()
        .find(|e| e.action == action && targets(e, subject_id) && is_fresh(e, observed_at))
        .and_then(|e| e.actor.clone())
}

/// Classifies a departure from a recency-ordered window of entries.
pub fn classify(subject_id: u64, observed_at: DateTime<Utc>, entries: &[AuditEntry]) -> Classification {
    for entry in entries {
        if !targets(entry, subject_id) || !is_fresh(entry, observed_at) {
            continue;
        }
        match entry.action {
            AuditAction::Ban => return Classification::Banned(entry.actor.clone()),
            AuditAction::Kick => return Classification::Kicked(entry.actor.clone()),
            AuditAction::Other => continue,
        }
    }
    Classification::Left
}

/// Requests the audit window for `member`, optionally limited to one action kind.
pub async fn try_fetch_window(
    source: &dyn AuditLogSource,
    member: &MemberSnapshot,
    action: Option<AuditAction>,
) -> Result<Vec<AuditEntry>> {
    let entries = source
        .recent_entries(member.guild_id, member.id, action, AUDIT_WINDOW)
        .await?;
    debug!(
        guild_id = member.guild_id,
        member_id = member.id,
        count = entries.len(),
        "Fetched audit window"
    );
    Ok(entries)
}

/// [`try_fetch_window`] with the degrade policy: a failing source yields an empty window.
pub async fn fetch_window(
    source: &dyn AuditLogSource,
    member: &MemberSnapshot,
    action: Option<AuditAction>,
) -> Vec<AuditEntry> {
    match try_fetch_window(source, member, action).await {
        Ok(entries) => entries,
        Err(e) => {
            warn!(
                error = %e,
                guild_id = member.guild_id,
                member_id = member.id,
                "Audit log lookup failed; treating as no match"
            );
            Vec::new()
        }
    }
}

/// [`fetch_window`] then [`classify`] at the member's observation time.
pub async fn classify_from_source(source: &dyn AuditLogSource, member: &MemberSnapshot) -> Classification {
    let entries = fetch_window(source, member, None).await;
    classify(member.id, member.observed_at, &entries)
}
