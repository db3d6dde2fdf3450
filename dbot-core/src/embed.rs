//! Outbound announcement payloads: plain text or a structured embed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author line shown above an embed title (guild name and icon).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedAuthor {
    pub name: String,
    pub icon_url: Option<String>,
}

/// Structured rich message. Field names follow the platform's embed object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    /// RGB color, e.g. `0xE74C3C`.
    pub color: u32,
    pub author: Option<EmbedAuthor>,
    pub thumbnail_url: Option<String>,
    pub image_url: Option<String>,
    pub footer: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// A rendered announcement ready for the outbound [`crate::Bot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Announcement {
    Text(String),
    Embed(Embed),
}

impl Announcement {
    /// Main body text regardless of variant (embed description for embeds).
    pub fn body(&self) -> &str {
        match self {
            Announcement::Text(text) => text,
            Announcement::Embed(embed) => &embed.description,
        }
    }
}
