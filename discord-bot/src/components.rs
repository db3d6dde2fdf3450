//! Component factory: shared collaborators for the dispatcher and the handler chain.

use std::sync::Arc;

use conversation::ConversationBuffer;
use dbot_core::{Bot, BotIdentity, EventLog};
use handler_chain::HandlerChain;
use llm_client::LlmClient;
use member_events::AuditLogSource;
use persona::Persona;
use tokio::sync::{Mutex, RwLock};

use crate::handlers::{CommandHandler, EventLogHandler, MentionHandler};

/// Collaborators shared by every event; cheap to clone.
#[derive(Clone)]
pub struct BotComponents {
    pub bot: Arc<dyn Bot>,
    pub audit_source: Arc<dyn AuditLogSource>,
    pub llm_client: Arc<dyn LlmClient>,
    pub persona: Arc<Persona>,
    pub buffer: Arc<Mutex<ConversationBuffer>>,
    /// Filled once the gateway reports ready.
    pub identity: Arc<RwLock<Option<BotIdentity>>>,
    pub event_log: Arc<EventLog>,
}

impl BotComponents {
    /// Builds components with an empty buffer of `max_history` turns using the persona's reply cue.
    pub fn new(
        bot: Arc<dyn Bot>,
        audit_source: Arc<dyn AuditLogSource>,
        llm_client: Arc<dyn LlmClient>,
        persona: Persona,
        max_history: usize,
        event_log: Arc<EventLog>,
    ) -> Self {
        let buffer = ConversationBuffer::new(max_history).with_cue(persona.reply_cue.clone());
        Self {
            bot,
            audit_source,
            llm_client,
            persona: Arc::new(persona),
            buffer: Arc::new(Mutex::new(buffer)),
            identity: Arc::new(RwLock::new(None)),
            event_log,
        }
    }
}

/// Chain order: event log, mention reply, prefix commands.
pub fn build_handler_chain(components: &BotComponents, command_prefix: &str) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(EventLogHandler::new(components.event_log.clone())))
        .add_handler(Arc::new(MentionHandler::new(
            components.identity.clone(),
            components.buffer.clone(),
            components.llm_client.clone(),
            components.bot.clone(),
            components.persona.clone(),
            components.event_log.clone(),
        )))
        .add_handler(Arc::new(CommandHandler::new(
            command_prefix,
            components.bot.clone(),
            components.persona.clone(),
        )))
}
