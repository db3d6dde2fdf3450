//! Pure functions for bot-mention detection and question extraction.
//!
//! The platform renders a mention of the bot as `<@id>` or, for the legacy nickname form, `<@!id>`;
//! both are recognized and stripped.

use dbot_core::BotIdentity;

/// Returns true if `text` contains either mention form of the bot.
#[inline]
pub fn is_bot_mentioned(text: &str, identity: &BotIdentity) -> bool {
    identity
        .mention_forms()
        .iter()
        .any(|form| text.contains(form.as_str()))
}

/// Strips every bot mention from `text` and returns the trimmed remainder.
pub fn extract_question(text: &str, identity: &BotIdentity) -> String {
    identity
        .mention_forms()
        .iter()
        .fold(text.to_string(), |acc, form| acc.replace(form.as_str(), ""))
        .trim()
        .to_string()
}

/// Resolves the user question if `text` mentions the bot.
///
/// - **Mention with text**: the text without the mention.
/// - **Bare mention**: `empty_mention_default`, if given.
/// - Otherwise None.
pub fn get_question(
    text: &str,
    identity: Option<&BotIdentity>,
    empty_mention_default: Option<&str>,
) -> Option<String> {
    let identity = identity?;
    if !is_bot_mentioned(text, identity) {
        return None;
    }
    let question = extract_question(text, identity);
    if !question.is_empty() {
        return Some(question);
    }
    empty_mention_default.map(str::to_string)
}
