//! # Discord bot application
//!
//! Wires the serenity gateway to the transport-agnostic pieces: the [`Dispatcher`] matches on
//! [`dbot_core::BotEvent`], runs the handler chain for chat messages (event log, mention reply,
//! commands) and the member-event path for bans and removals. Config comes from env (`.env`).

pub mod chat;
pub mod cli;
pub mod components;
pub mod config;
pub mod discord;
pub mod dispatcher;
pub mod handlers;
pub mod mention;
pub mod runner;

pub use cli::{load_config, Cli, Commands};
pub use components::{build_handler_chain, BotComponents};
pub use config::{BaseConfig, BotConfig};
pub use dispatcher::Dispatcher;
pub use handlers::{provider_reply, CommandHandler, EventLogHandler, MentionHandler};
pub use runner::run_bot;
