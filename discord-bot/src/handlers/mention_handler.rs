//! Mention handler: relays an explicit bot mention to the generative model with recent history,
//! replies in the channel and records the exchange in the conversation buffer.

use std::sync::Arc;

use async_trait::async_trait;
use conversation::{ConversationBuffer, ConversationTurn};
use dbot_core::{Bot, BotIdentity, EventLog, Handler, HandlerResponse, Message, Result};
use llm_client::LlmClient;
use persona::Persona;
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info, instrument, warn};

use crate::mention;

/// Reply text for a model result: the reply itself, or the persona's visible error text.
pub fn provider_reply(persona: &Persona, result: &anyhow::Result<String>) -> String {
    match result {
        Ok(text) => text.clone(),
        Err(e) => persona.provider_error_reply(&e.to_string()),
    }
}

/// Handles messages that mention the bot; everything else continues down the chain.
///
/// **External interactions:** Bot trait (reply), LlmClient (model call), EventLog (prompt line).
#[derive(Clone)]
pub struct MentionHandler {
    identity: Arc<RwLock<Option<BotIdentity>>>,
    buffer: Arc<Mutex<ConversationBuffer>>,
    llm_client: Arc<dyn LlmClient>,
    bot: Arc<dyn Bot>,
    persona: Arc<Persona>,
    event_log: Arc<EventLog>,
}

impl MentionHandler {
    pub fn new(
        identity: Arc<RwLock<Option<BotIdentity>>>,
        buffer: Arc<Mutex<ConversationBuffer>>,
        llm_client: Arc<dyn LlmClient>,
        bot: Arc<dyn Bot>,
        persona: Arc<Persona>,
        event_log: Arc<EventLog>,
    ) -> Self {
        Self {
            identity,
            buffer,
            llm_client,
            bot,
            persona,
            event_log,
        }
    }

    /// Question for the model if `message` mentions the bot.
    pub async fn get_question(&self, message: &Message) -> Option<String> {
        let identity = self.identity.read().await;
        mention::get_question(
            &message.content,
            identity.as_ref(),
            Some(self.persona.empty_mention_prompt.as_str()),
        )
    }
}

#[async_trait]
impl Handler for MentionHandler {
    #[instrument(skip(self, message), fields(message_id = message.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(question) = self.get_question(message).await else {
            return Ok(HandlerResponse::Continue);
        };

        // lock released before the model call
        let prompt = self.buffer.lock().await.render_prompt(&question);
        info!(
            user_id = message.user.id,
            channel_id = message.chat.id,
            prompt_len = prompt.len(),
            "step: MentionHandler calling model"
        );
        self.event_log.append(&format!(
            "[PROMPT] for {} in #{}: {}",
            message.user.id, message.chat.id, prompt
        ));

        let result = self
            .llm_client
            .get_llm_response(&self.persona.system_instruction, &prompt)
            .await;
        let reply = provider_reply(&self.persona, &result);

        match &result {
            Ok(_) => {
                let mut buffer = self.buffer.lock().await;
                buffer.append(ConversationTurn::user(question));
                buffer.append(ConversationTurn::bot(reply.clone()));
            }
            Err(e) => warn!(error = %e, user_id = message.user.id, "Model call failed"),
        }

        if let Err(e) = self.bot.reply_to(message, &reply).await {
            error!(error = %e, channel_id = message.chat.id, "Failed to send reply");
        }
        Ok(HandlerResponse::Reply(reply))
    }
}
