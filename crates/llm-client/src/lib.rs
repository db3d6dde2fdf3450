//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait and a Gemini implementation. Transport-agnostic; used by the
//! mention handler and the terminal chat loop in `discord-bot`.

use anyhow::Result;
use async_trait::async_trait;

mod config;
mod gemini;

pub use config::{EnvLlmConfig, LlmConfig, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
pub use gemini::GeminiLlmClient;

/// Generative-text interface: a persona system instruction plus one prompt in, reply text out.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the model reply for `prompt` under `system_instruction`.
    async fn get_llm_response(&self, system_instruction: &str, prompt: &str) -> Result<String>;
}

/// Masks an API key for safe logging: first 7 chars + "***" + last 4 chars.
/// Keys of 11 chars or fewer are fully masked.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}***{}", head, tail)
}
