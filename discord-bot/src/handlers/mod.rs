//! Handlers run by the chat-message chain: event log, mention reply, prefix commands.

mod command_handler;
mod event_log_handler;
mod mention_handler;

pub use command_handler::CommandHandler;
pub use event_log_handler::EventLogHandler;
pub use mention_handler::{provider_reply, MentionHandler};
