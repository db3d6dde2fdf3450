//! Announcement rendering for classified departures.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use dbot_core::{format_utc, Announcement, Embed, EmbedAuthor, GuildInfo, MemberSnapshot};
use persona::{fill, DurationComments, EventTemplate, Persona};

use crate::audit::Classification;

/// Output shape of announcements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnnouncementStyle {
    #[default]
    Embed,
    Text,
}

impl FromStr for AnnouncementStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "embed" => Ok(Self::Embed),
            "text" => Ok(Self::Text),
            other => Err(format!("unknown announcement style '{}' (embed|text)", other)),
        }
    }
}

impl fmt::Display for AnnouncementStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embed => f.write_str("embed"),
            Self::Text => f.write_str("text"),
        }
    }
}

/// Membership duration bands for leave commentary. Upper bounds are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationBand {
    Unknown,
    UnderOneDay,
    UnderOneWeek,
    UnderOneMonth,
    UnderHalfYear,
    Veteran,
}

impl DurationBand {
    pub fn from_days(days: Option<i64>) -> Self {
        match days {
            None => Self::Unknown,
            Some(d) if d < 1 => Self::UnderOneDay,
            Some(d) if d < 7 => Self::UnderOneWeek,
            Some(d) if d < 30 => Self::UnderOneMonth,
            Some(d) if d < 180 => Self::UnderHalfYear,
            Some(_) => Self::Veteran,
        }
    }

    pub fn comment<'a>(&self, comments: &'a DurationComments) -> &'a str {
        match self {
            Self::Unknown => &comments.unknown,
            Self::UnderOneDay => &comments.under_one_day,
            Self::UnderOneWeek => &comments.under_one_week,
            Self::UnderOneMonth => &comments.under_one_month,
            Self::UnderHalfYear => &comments.under_half_year,
            Self::Veteran => &comments.veteran,
        }
    }
}

fn template<'a>(persona: &'a Persona, classification: &Classification) -> &'a EventTemplate {
    let templates = &persona.announcements;
    match classification {
        Classification::Banned(_) => &templates.ban,
        Classification::Kicked(_) => &templates.kick,
        Classification::Left => &templates.leave,
    }
}

fn headline(template: &EventTemplate, classification: &Classification, member: &MemberSnapshot) -> String {
    let member_mention = member.mention();
    match classification.actor() {
        Some(actor) => fill(
            &template.message_with_moderator,
            &[("member", &member_mention), ("moderator", &actor.mention())],
        ),
        None => fill(&template.message, &[("member", &member_mention)]),
    }
}

/// `label：value` lines; embeds get markdown emphasis, plain text does not.
fn detail_lines(
    persona: &Persona,
    classification: &Classification,
    member: &MemberSnapshot,
    now: DateTime<Utc>,
    markdown: bool,
) -> Vec<String> {
    let labels = &persona.announcements.labels;
    let (bold, code) = if markdown { ("**", "`") } else { ("", "") };

    let joined = member
        .joined_at
        .as_ref()
        .map(format_utc)
        .unwrap_or_else(|| labels.unknown.clone());
    let days = member.days_in_server(now);
    let stay = days
        .map(|d| format!("{} {}", d, labels.days_suffix))
        .unwrap_or_else(|| labels.unknown.clone());

    let mut lines = vec![
        format!("{}：{bold}{}{bold}", labels.display_name, member.display_name),
        format!(
            "{}：{code}{}{code}",
            labels.account_created,
            format_utc(&member.account_created_at)
        ),
        format!("{}：{code}{}{code}", labels.joined, joined),
        format!("{}：{code}{}{code}", labels.stay, stay),
    ];
    if matches!(classification, Classification::Left) {
        let comment = DurationBand::from_days(days).comment(&persona.announcements.leave_comments);
        lines.push(format!("{}：{}", labels.comment, comment));
    }
    lines
}

/// Renders the announcement for `classification`.
pub fn compose(
    persona: &Persona,
    style: AnnouncementStyle,
    classification: &Classification,
    member: &MemberSnapshot,
    guild: &GuildInfo,
    now: DateTime<Utc>,
) -> Announcement {
    let template = template(persona, classification);
    let headline = headline(template, classification, member);

    match style {
        AnnouncementStyle::Text => {
            let details = detail_lines(persona, classification, member, now, false);
            Announcement::Text(format!("{}\n\n{}", headline, details.join("\n")))
        }
        AnnouncementStyle::Embed => {
            let details = detail_lines(persona, classification, member, now, true);
            let footer = match classification.actor() {
                Some(actor) => format!(
                    "{} · {}：{}",
                    template.footer,
                    persona.announcements.labels.moderator,
                    actor.label()
                ),
                None => template.footer.clone(),
            };
            Announcement::Embed(Embed {
                title: template.title.clone(),
                description: format!("{}\n\n{}", headline, details.join("\n")),
                color: template.color,
                author: Some(EmbedAuthor {
                    name: guild.name.clone(),
                    icon_url: guild.icon_url.clone(),
                }),
                thumbnail_url: member.avatar_url.clone(),
                image_url: template.image_url.clone(),
                footer: (!footer.is_empty()).then_some(footer),
                timestamp: now,
            })
        }
    }
}

/// Announcement for a removal notification. Bans are announced from the ban notification, so a
/// removal classified as [`Classification::Banned`] yields nothing.
pub fn removal_announcement(
    persona: &Persona,
    style: AnnouncementStyle,
    classification: &Classification,
    member: &MemberSnapshot,
    guild: &GuildInfo,
    now: DateTime<Utc>,
) -> Option<Announcement> {
    match classification {
        Classification::Banned(_) => None,
        _ => Some(compose(persona, style, classification, member, guild, now)),
    }
}
