//! Handler that writes inbound messages and bot replies to the append-only event log.

use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{EventLog, Handler, HandlerResponse, Message, Result};
use tracing::{debug, instrument};

/// Logs each inbound message in before() and the reply (if any) in after(); always continues.
#[derive(Clone)]
pub struct EventLogHandler {
    event_log: Arc<EventLog>,
}

impl EventLogHandler {
    pub fn new(event_log: Arc<EventLog>) -> Self {
        Self { event_log }
    }
}

#[async_trait]
impl Handler for EventLogHandler {
    #[instrument(skip(self, message), fields(message_id = message.id))]
    async fn before(&self, message: &Message) -> Result<bool> {
        debug!(
            user_id = message.user.id,
            channel_id = message.chat.id,
            "step: EventLogHandler before, logging inbound message"
        );
        self.event_log.append(&format!(
            "[MESSAGE] {} ({}) in #{}: {}",
            message.user.display(),
            message.user.id,
            message.chat.id,
            message.content
        ));
        Ok(true)
    }

    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        if let HandlerResponse::Reply(text) = response {
            self.event_log.append(&format!(
                "[REPLY] to {} in #{}: {}",
                message.user.id, message.chat.id, text
            ));
        }
        Ok(())
    }
}
