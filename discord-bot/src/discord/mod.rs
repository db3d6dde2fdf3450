//! serenity layer: model conversion, outbound [`dbot_core::Bot`] implementation, moderation-log
//! source and the gateway `EventHandler` feeding the dispatcher.

mod adapters;
mod audit_source;
mod bot_adapter;
mod event_handler;

pub use adapters::{
    guild_info, member_snapshot, snowflake_time, DiscordMessageWrapper, DiscordUserWrapper,
};
pub use audit_source::SerenityAuditLogSource;
pub use bot_adapter::DiscordBotAdapter;
pub use event_handler::{gateway_intents, DiscordEventHandler};
