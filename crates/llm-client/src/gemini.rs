//! Gemini implementation of [`LlmClient`] over the `generateContent` REST endpoint.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::config::{LlmConfig, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use super::{mask_token, LlmClient};

/// Gemini `generateContent` client.
#[derive(Debug, Clone)]
pub struct GeminiLlmClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl GeminiLlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Builds a client from any [`LlmConfig`].
    pub fn from_config(config: &dyn LlmConfig) -> Self {
        Self::new(config.api_key().to_string())
            .with_base_url(config.base_url())
            .with_model(config.model())
            .with_timeout(Duration::from_secs(config.timeout_secs()))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Concatenated text parts of the first candidate, or an error naming why there is none.
fn extract_text(response: GenerateContentResponse) -> Result<String> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(anyhow!("Gemini returned no candidates: {}", reason));
    };
    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "empty".to_string());
        return Err(anyhow!("Gemini returned an empty candidate: {}", reason));
    }
    Ok(text)
}

#[async_trait]
impl LlmClient for GeminiLlmClient {
    #[instrument(skip(self, system_instruction, prompt), fields(model = %self.model))]
    async fn get_llm_response(&self, system_instruction: &str, prompt: &str) -> Result<String> {
        info!(
            api_key = %mask_token(&self.api_key),
            prompt_len = prompt.len(),
            "Gemini generateContent request"
        );

        let request = GenerateContentRequest {
            system_instruction: (!system_instruction.is_empty()).then(|| Content {
                role: None,
                parts: vec![Part {
                    text: system_instruction,
                }],
            }),
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .context("Gemini request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| match e.error.status {
                    Some(s) => format!("{} ({})", e.error.message, s),
                    None => e.error.message,
                })
                .unwrap_or(body);
            warn!(status = %status, detail = %detail, "Gemini returned an error status");
            return Err(anyhow!("Gemini API error {}: {}", status, detail));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;
        let text = extract_text(parsed)?;
        info!(reply_len = text.len(), "Gemini generateContent response");
        Ok(text)
    }
}
