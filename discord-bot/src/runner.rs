//! Main entry for the gateway client.

use std::sync::Arc;

use anyhow::{Context, Result};
use dbot_core::EventLog;
use llm_client::{GeminiLlmClient, LlmClient};
use serenity::Client;
use tracing::{info, instrument};

use crate::config::BotConfig;
use crate::discord::{gateway_intents, DiscordEventHandler};

/// Validate config, build the Gemini client and event handler, then run the gateway client until it
/// stops. Tracing is expected to be running already (see [`crate::load_config`]).
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;

    let llm_client: Arc<dyn LlmClient> = Arc::new(GeminiLlmClient::from_config(&config.llm));
    let event_log = Arc::new(EventLog::new(config.event_log_file()));

    info!(
        persona = %config.persona.name,
        model = %config.llm.gemini_model,
        log_channel_id = ?config.log_channel_id(),
        announce_style = %config.base.announce_style,
        max_history = config.base.max_history,
        "Initializing bot"
    );

    let token = config.bot_token().to_string();
    let handler = DiscordEventHandler::new(config, llm_client, event_log);
    let mut client = Client::builder(&token, gateway_intents())
        .event_handler(handler)
        .await
        .context("Failed to build Discord client")?;

    info!("Bot started successfully");
    client
        .start()
        .await
        .context("Discord client stopped with an error")?;
    Ok(())
}
