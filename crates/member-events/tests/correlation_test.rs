//! Integration tests for audit correlation against an [`AuditLogSource`] and the removal policy.
//!
//! Covers: recent ban found through the source, lookup failure degrading to Left, the requested
//! window size and action filter, and the ban/removal suppression rule end to end with the composer.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use dbot_core::{DbotError, GuildInfo, MemberSnapshot};
use member_events::{
    classify_from_source, fetch_window, removal_announcement, try_fetch_window, Actor,
    AnnouncementStyle, AuditAction, AuditEntry, AuditLogSource, Classification, AUDIT_WINDOW,
};
use persona::Persona;

/// Source returning fixed entries (or an error) and recording the requested limit.
struct FixedSource {
    entries: Option<Vec<AuditEntry>>,
    requested: Mutex<Vec<(u64, u64, Option<AuditAction>, u8)>>,
}

impl FixedSource {
    fn with_entries(entries: Vec<AuditEntry>) -> Self {
        Self {
            entries: Some(entries),
            requested: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            entries: None,
            requested: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AuditLogSource for FixedSource {
    async fn recent_entries(
        &self,
        guild_id: u64,
        target_id: u64,
        action: Option<AuditAction>,
        limit: u8,
    ) -> dbot_core::Result<Vec<AuditEntry>> {
        self.requested
            .lock()
            .unwrap()
            .push((guild_id, target_id, action, limit));
        match &self.entries {
            Some(entries) => Ok(entries.clone()),
            None => Err(DbotError::AuditLookup("missing permission".to_string())),
        }
    }
}

fn member(observed_at: DateTime<Utc>) -> MemberSnapshot {
    MemberSnapshot {
        id: 500,
        display_name: "跑路人".to_string(),
        avatar_url: None,
        account_created_at: Utc.with_ymd_and_hms(2022, 2, 2, 2, 2, 2).unwrap(),
        joined_at: Some(observed_at - Duration::days(12)),
        guild_id: 900,
        observed_at,
    }
}

fn guild() -> GuildInfo {
    GuildInfo {
        id: 900,
        name: "测试服".to_string(),
        icon_url: None,
    }
}

fn ban_entry(target: u64, created_at: DateTime<Utc>) -> AuditEntry {
    AuditEntry {
        target_id: Some(target),
        actor: Some(Actor {
            id: 1,
            display_name: Some("mod".to_string()),
        }),
        action: AuditAction::Ban,
        created_at,
    }
}

/// **Test: A ban recorded 3 seconds before observation classifies as Banned.**
///
/// **Setup:** Source with one ban entry for the member, 3 seconds old.
/// **Action:** `classify_from_source`.
/// **Expected:** Banned with the moderator; the source was asked for the member with the window size.
#[tokio::test]
async fn test_recent_ban_through_source() {
    let now = Utc::now();
    let source = FixedSource::with_entries(vec![ban_entry(500, now - Duration::seconds(3))]);

    let result = classify_from_source(&source, &member(now)).await;

    assert_eq!(result.kind(), "ban");
    assert_eq!(result.actor().map(|a| a.id), Some(1));
    assert_eq!(
        source.requested.lock().unwrap().as_slice(),
        &[(900, 500, None, AUDIT_WINDOW)]
    );
}

/// **Test: The requested action filter reaches the source; only the degrading fetch hides failures.**
///
/// **Setup:** One source with a ban entry, one failing source.
/// **Action:** `fetch_window` / `try_fetch_window` with a Ban filter.
/// **Expected:** Ban filter recorded with the window size; failing source gives Err from
/// `try_fetch_window` and an empty window from `fetch_window`.
#[tokio::test]
async fn test_action_filter_and_failure_policy() {
    let now = Utc::now();
    let source = FixedSource::with_entries(vec![ban_entry(500, now - Duration::seconds(1))]);
    let entries = fetch_window(&source, &member(now), Some(AuditAction::Ban)).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(
        source.requested.lock().unwrap().as_slice(),
        &[(900, 500, Some(AuditAction::Ban), AUDIT_WINDOW)]
    );

    let failing = FixedSource::failing();
    let err = try_fetch_window(&failing, &member(now), Some(AuditAction::Ban))
        .await
        .unwrap_err();
    assert!(matches!(err, DbotError::AuditLookup(_)));
    assert!(fetch_window(&failing, &member(now), None).await.is_empty());
}

/// **Test: A failing audit lookup degrades to Left.**
///
/// **Setup:** Source that always errors.
/// **Action:** `classify_from_source`.
/// **Expected:** Left; no error surfaces.
#[tokio::test]
async fn test_lookup_failure_degrades_to_left() {
    let source = FixedSource::failing();
    let result = classify_from_source(&source, &member(Utc::now())).await;
    assert_eq!(result, Classification::Left);
}

/// **Test: A 15 second old ban is stale and the removal is announced as a leave.**
///
/// **Setup:** Source with one ban entry 15 seconds old.
/// **Action:** classify, then `removal_announcement`.
/// **Expected:** Left; an announcement carrying the under-one-month comment (12 days in server).
#[tokio::test]
async fn test_stale_ban_announced_as_leave() {
    let now = Utc::now();
    let source = FixedSource::with_entries(vec![ban_entry(500, now - Duration::seconds(15))]);
    let persona = Persona::default();
    let m = member(now);

    let classification = classify_from_source(&source, &m).await;
    let announcement = removal_announcement(
        &persona,
        AnnouncementStyle::Text,
        &classification,
        &m,
        &guild(),
        now,
    )
    .expect("leave must be announced");

    assert_eq!(classification, Classification::Left);
    assert!(announcement
        .body()
        .contains(&persona.announcements.leave_comments.under_one_month));
}

/// **Test: A removal caused by a fresh ban produces no announcement.**
///
/// **Setup:** Source with a 2 second old ban entry for the member.
/// **Action:** classify, then `removal_announcement`.
/// **Expected:** None (the ban notification announces it instead).
#[tokio::test]
async fn test_removal_after_ban_is_suppressed() {
    let now = Utc::now();
    let source = FixedSource::with_entries(vec![ban_entry(500, now - Duration::seconds(2))]);
    let m = member(now);

    let classification = classify_from_source(&source, &m).await;
    let announcement = removal_announcement(
        &Persona::default(),
        AnnouncementStyle::Embed,
        &classification,
        &m,
        &guild(),
        now,
    );

    assert!(announcement.is_none());
}
