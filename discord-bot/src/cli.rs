//! CLI parser and config loading (which also starts tracing).

use anyhow::Result;
use clap::{Parser, Subcommand};
use dbot_core::init_tracing;

use crate::config::{BaseConfig, BotConfig};

#[derive(Parser)]
#[command(name = "discord-bot")]
#[command(about = "Persona Discord bot: Gemini mention replies and membership announcements", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Discord bot (config from env; token can override DISCORD_BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Chat with the persona in the terminal (GOOGLE_AI_KEY only; no Discord connection).
    Chat,
}

/// Load BotConfig from environment. If `token` is provided it overrides DISCORD_BOT_TOKEN.
///
/// The Discord part is loaded and validated first and tracing is started with its `LOG_FILE`, so
/// the Gemini and persona loading that follows is already logged.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    let base = BaseConfig::load(token)?;
    base.validate()?;
    init_tracing(&base.log_file)?;
    BotConfig::from_base(base)
}
