//! Core types: user, chat, message, bot identity, handler response, and Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Renders the platform mention markup for a user id (`<@id>`).
pub fn mention_of(user_id: u64) -> String {
    format!("<@{}>", user_id)
}

/// User identity (snowflake id, account name, optional server/global display name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub display_name: Option<String>,
    pub is_bot: bool,
}

impl User {
    /// Mention markup for this user.
    pub fn mention(&self) -> String {
        mention_of(self.id)
    }

    /// Display name when set, otherwise the account name.
    pub fn display(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// Text channel a message arrived in; `guild_id` is None for direct messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: u64,
    pub guild_id: Option<u64>,
}

/// A single chat message with author, channel and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub direction: MessageDirection,
    pub created_at: DateTime<Utc>,
    /// Id of the message this one replies to, if any.
    pub reply_to_message_id: Option<u64>,
}

/// Direction of the message (from user or from bot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageDirection {
    Incoming,
    Outgoing,
}

/// The bot's own identity, known once the gateway reports ready.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotIdentity {
    pub id: u64,
    pub name: String,
}

impl BotIdentity {
    /// Both mention forms the platform may emit for the bot (`<@id>` and the legacy nickname form `<@!id>`).
    pub fn mention_forms(&self) -> [String; 2] {
        [mention_of(self.id), format!("<@!{}>", self.id)]
    }
}

/// Handler result for the chain. `Reply(text)` carries the response body so later handlers can use it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach reply text (e.g. log the LLM reply in a handler's `after()`).
    Reply(String),
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the message. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_display_prefers_display_name() {
        let user = User {
            id: 42,
            name: "account".to_string(),
            display_name: Some("Nick".to_string()),
            is_bot: false,
        };
        assert_eq!(user.display(), "Nick");
        assert_eq!(user.mention(), "<@42>");
    }

    #[test]
    fn test_user_display_falls_back_to_name() {
        let user = User {
            id: 7,
            name: "account".to_string(),
            display_name: None,
            is_bot: false,
        };
        assert_eq!(user.display(), "account");
    }

    #[test]
    fn test_bot_identity_mention_forms() {
        let me = BotIdentity {
            id: 99,
            name: "bot".to_string(),
        };
        assert_eq!(me.mention_forms(), ["<@99>".to_string(), "<@!99>".to_string()]);
    }
}
