//! Bot configuration: BaseConfig (Discord + logging + announcements) + LLM config + persona.

mod base;
mod bot_config;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
