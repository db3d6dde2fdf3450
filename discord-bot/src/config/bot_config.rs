//! BotConfig: BaseConfig + Gemini config + persona. Use load() for env-based loading.

use anyhow::Result;
use llm_client::EnvLlmConfig;
use persona::Persona;

use super::BaseConfig;

/// Full bot config. Use BotConfig::load() for env-based loading.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub llm: EnvLlmConfig,
    pub persona: Persona,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides DISCORD_BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        Self::from_base(BaseConfig::load(token)?)
    }

    /// Completes an already loaded BaseConfig with the Gemini config and persona from env.
    pub fn from_base(base: BaseConfig) -> Result<Self> {
        let llm = EnvLlmConfig::from_env()?;
        let persona = Persona::from_env()?;
        Ok(Self { base, llm, persona })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn event_log_file(&self) -> &str {
        &self.base.event_log_file
    }
    pub fn log_channel_id(&self) -> Option<u64> {
        self.base.log_channel_id
    }
}
