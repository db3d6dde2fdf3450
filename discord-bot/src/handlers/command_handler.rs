//! Prefix commands (`!ping`).

use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{Bot, Handler, HandlerResponse, Message, Result};
use persona::Persona;
use tracing::{debug, error, info, instrument};

/// Answers prefix commands in persona voice. Unknown commands fall through.
#[derive(Clone)]
pub struct CommandHandler {
    prefix: String,
    bot: Arc<dyn Bot>,
    persona: Arc<Persona>,
}

impl CommandHandler {
    pub fn new(prefix: impl Into<String>, bot: Arc<dyn Bot>, persona: Arc<Persona>) -> Self {
        Self {
            prefix: prefix.into(),
            bot,
            persona,
        }
    }

    /// Lowercased command name if `text` starts with the prefix.
    pub fn parse_command(&self, text: &str) -> Option<String> {
        let rest = text.trim_start().strip_prefix(self.prefix.as_str())?;
        rest.split_whitespace().next().map(str::to_lowercase)
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message), fields(message_id = message.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(command) = self.parse_command(&message.content) else {
            return Ok(HandlerResponse::Continue);
        };

        match command.as_str() {
            "ping" => {
                info!(user_id = message.user.id, "step: ping command");
                let reply = self.persona.ping_reply.clone();
                if let Err(e) = self.bot.send_message(&message.chat, &reply).await {
                    error!(error = %e, channel_id = message.chat.id, "Failed to send ping reply");
                }
                Ok(HandlerResponse::Reply(reply))
            }
            other => {
                debug!(command = %other, "Unknown command, ignored");
                Ok(HandlerResponse::Continue)
            }
        }
    }
}
