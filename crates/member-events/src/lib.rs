//! # Member events
//!
//! The two pure steps behind ban / kick / leave announcements:
//!
//! - [`audit`]: correlate a departure with recent moderation-log entries ([`classify`]).
//! - [`compose`]: render the persona announcement for a classified departure ([`compose()`]).
//!
//! The moderation log itself is reached through the [`AuditLogSource`] trait; a failing source
//! degrades to [`Classification::Left`] instead of blocking the announcement.

pub mod audit;
pub mod compose;

pub use audit::{
    classify, classify_from_source, fetch_window, find_actor, try_fetch_window, Actor, AuditAction,
    AuditEntry, AuditLogSource, Classification, AUDIT_WINDOW, STALENESS_THRESHOLD_SECS,
};
pub use compose::{compose, removal_announcement, AnnouncementStyle, DurationBand};
