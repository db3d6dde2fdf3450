//! LLM configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// LLM configuration interface.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
    fn timeout_secs(&self) -> u64;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub google_ai_key: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub timeout_secs: u64,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.google_ai_key
    }
    fn base_url(&self) -> &str {
        &self.gemini_base_url
    }
    fn model(&self) -> &str {
        &self.gemini_model
    }
    fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}

impl EnvLlmConfig {
    /// Load from environment variables: GOOGLE_AI_KEY (required), GEMINI_MODEL, GEMINI_BASE_URL, GEMINI_TIMEOUT_SECS.
    pub fn from_env() -> Result<Self> {
        let google_ai_key = env::var("GOOGLE_AI_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .context("GOOGLE_AI_KEY not set")?;
        let gemini_base_url =
            env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string());
        let gemini_model =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());
        let timeout_secs = env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Ok(Self {
            google_ai_key,
            gemini_base_url,
            gemini_model,
            timeout_secs,
        })
    }
}
