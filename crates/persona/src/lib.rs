//! # Persona
//!
//! Every piece of persona-flavored prose the bot emits lives in one [`Persona`] value: the system
//! instruction sent to the model, the cue that ends each prompt, command replies, terminal chat
//! strings and the membership announcement templates. Logic elsewhere is persona-agnostic and only
//! reads these fields.
//!
//! Selection (see [`Persona::from_env`]): `PERSONA_FILE` (JSON, missing top-level fields fall back
//! to the default preset) or `BOT_PERSONA` naming a built-in preset.

mod presets;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use tracing::info;

/// Names accepted by [`Persona::preset`].
pub const PRESET_NAMES: &[&str] = &["tieba", "bazong"];

/// Default preset when nothing is configured.
pub const DEFAULT_PRESET: &str = "tieba";

/// Complete persona configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Persona {
    pub name: String,
    /// System instruction for the generative model.
    pub system_instruction: String,
    /// Appended after the user's input so the model answers in character (e.g. `霸总：`).
    pub reply_cue: String,
    /// Used as the question when the user mentions the bot with no text.
    pub empty_mention_prompt: String,
    /// Visible reply when the model call fails; `{error}` is replaced by the error text.
    pub provider_error: String,
    /// Reply to the `ping` command.
    pub ping_reply: String,
    /// Terminal chat mode strings.
    pub chat: ChatStrings,
    pub announcements: AnnouncementTemplates,
}

/// Strings for the terminal chat loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatStrings {
    pub banner: String,
    pub reply_header: String,
    pub farewell: String,
}

/// Templates for ban / kick / leave announcements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementTemplates {
    pub ban: EventTemplate,
    pub kick: EventTemplate,
    pub leave: EventTemplate,
    pub leave_comments: DurationComments,
    pub labels: DetailLabels,
}

/// One announcement kind. `{member}` and `{moderator}` are replaced with mentions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTemplate {
    pub title: String,
    pub message: String,
    /// Used instead of `message` when the acting moderator is known.
    pub message_with_moderator: String,
    pub color: u32,
    pub image_url: Option<String>,
    pub footer: String,
}

/// Leave commentary by days in server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationComments {
    pub unknown: String,
    pub under_one_day: String,
    pub under_one_week: String,
    pub under_one_month: String,
    pub under_half_year: String,
    pub veteran: String,
}

/// Labels for the member detail lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailLabels {
    pub display_name: String,
    pub account_created: String,
    pub joined: String,
    pub stay: String,
    pub comment: String,
    pub moderator: String,
    pub unknown: String,
    pub days_suffix: String,
}

impl Default for Persona {
    fn default() -> Self {
        presets::tieba()
    }
}

impl Persona {
    /// Built-in preset by name (case-insensitive).
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "tieba" => Some(presets::tieba()),
            "bazong" => Some(presets::bazong()),
            _ => None,
        }
    }

    /// Loads a persona from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read persona file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid persona JSON in {}", path.display()))
    }

    /// `PERSONA_FILE` if set, else the `BOT_PERSONA` preset (default [`DEFAULT_PRESET`]).
    pub fn from_env() -> Result<Self> {
        if let Some(path) = env::var("PERSONA_FILE").ok().filter(|s| !s.trim().is_empty()) {
            let persona = Self::from_json_file(&path)?;
            info!(path = %path, name = %persona.name, "Loaded persona from file");
            return Ok(persona);
        }
        let name = env::var("BOT_PERSONA").unwrap_or_else(|_| DEFAULT_PRESET.to_string());
        let persona = Self::preset(&name).with_context(|| {
            format!(
                "Unknown BOT_PERSONA '{}'; expected one of: {}",
                name,
                PRESET_NAMES.join(", ")
            )
        })?;
        info!(name = %persona.name, "Using persona preset");
        Ok(persona)
    }

    /// Visible error reply for a failed model call.
    pub fn provider_error_reply(&self, error: &str) -> String {
        fill(&self.provider_error, &[("error", error)])
    }
}

/// Replaces each `{key}` in `template` with its value.
pub fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{}}}", key), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_fill_replaces_all_placeholders() {
        let out = fill(
            "{member} was removed by {moderator}; bye {member}",
            &[("member", "<@1>"), ("moderator", "<@2>")],
        );
        assert_eq!(out, "<@1> was removed by <@2>; bye <@1>");
    }

    #[test]
    fn test_fill_leaves_unknown_placeholders() {
        assert_eq!(fill("{other}", &[("member", "x")]), "{other}");
    }

    #[test]
    fn test_presets_are_complete() {
        for name in PRESET_NAMES {
            let persona = Persona::preset(name).unwrap();
            assert!(!persona.system_instruction.is_empty(), "{}", name);
            assert!(!persona.reply_cue.is_empty(), "{}", name);
            assert!(persona.announcements.kick.message_with_moderator.contains("{moderator}"));
            assert!(persona.announcements.ban.message.contains("{member}"));
            assert!(persona.provider_error.contains("{error}"));
        }
    }

    #[test]
    fn test_preset_lookup_is_case_insensitive() {
        assert_eq!(Persona::preset("BaZong").unwrap().name, presets::bazong().name);
        assert!(Persona::preset("unknown").is_none());
    }

    #[test]
    fn test_provider_error_reply() {
        let persona = Persona::default();
        let reply = persona.provider_error_reply("quota exceeded");
        assert!(reply.contains("quota exceeded"));
    }

    #[test]
    fn test_from_json_file_partial_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"name": "custom", "reply_cue": "Custom:", "ping_reply": "pong"}}"#
        )
        .unwrap();

        let persona = Persona::from_json_file(file.path()).unwrap();

        assert_eq!(persona.name, "custom");
        assert_eq!(persona.reply_cue, "Custom:");
        assert_eq!(persona.ping_reply, "pong");
        // untouched fields come from the default preset
        assert_eq!(persona.announcements, Persona::default().announcements);
    }

    #[test]
    fn test_from_json_file_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(Persona::from_json_file(file.path()).is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_preset_and_unknown() {
        env::remove_var("PERSONA_FILE");
        env::set_var("BOT_PERSONA", "bazong");
        assert_eq!(Persona::from_env().unwrap(), presets::bazong());

        env::set_var("BOT_PERSONA", "nope");
        let err = Persona::from_env().unwrap_err().to_string();
        assert!(err.contains("tieba"));

        env::remove_var("BOT_PERSONA");
        assert_eq!(Persona::from_env().unwrap(), Persona::default());
    }

    #[test]
    #[serial]
    fn test_from_env_file_takes_precedence() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"name": "from-file"}}"#).unwrap();
        env::set_var("PERSONA_FILE", file.path());
        env::set_var("BOT_PERSONA", "bazong");

        let persona = Persona::from_env().unwrap();

        env::remove_var("PERSONA_FILE");
        env::remove_var("BOT_PERSONA");
        assert_eq!(persona.name, "from-file");
    }
}
