//! Chat-completion client for summarization
//!
//! Sends one blocking request per call to an OpenAI-compatible endpoint. There
//! is no retry and no request timeout.

use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::LlmConfig;
use crate::error::Result;
use crate::prompts::{summarize_request, FILE_SUMMARIZE_PROMPT};

/// Default generation budget per summary
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Anything that can turn file content into a summary
pub trait Summarizer {
    /// Summarize `content` using at most `max_tokens` generated tokens
    fn summarize(&self, content: &str, max_tokens: u32) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
    model: &'a str,
    max_new_tokens: u32,
}

/// HTTP client for the configured endpoint
pub struct LlmClient {
    config: LlmConfig,
    client: Client,
}

impl LlmClient {
    /// Create a client without a request timeout
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(None::<std::time::Duration>)
            .build()?;
        Ok(Self::with_http_client(config, client))
    }

    /// Create a client around an existing HTTP client
    pub fn with_http_client(config: LlmConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Send a system + user exchange and return the generated text
    pub fn complete(&self, system_prompt: &str, user_content: &str, max_tokens: u32) -> Result<String> {
        crate::ensure!(!self.config.url.is_empty(), Config, "LLM API URL is not configured.");

        let body = ChatRequest {
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_content,
                },
            ],
            model: &self.config.model,
            max_new_tokens: max_tokens,
        };

        debug!("POST {} (model {})", self.config.url, self.config.model);
        let mut request = self.client.post(&self.config.url).json(&body);
        if !self.config.api_key.is_empty() {
            request = request.bearer_auth(&self.config.api_key);
        }

        let response = request.send()?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .unwrap_or_else(|_| "Unable to read error message".to_string());
            crate::bail!(Llm, "LLM API returned error status {}: {}", status, error_text);
        }

        let value: Value = response.json()?;
        Ok(extract_completion(&value))
    }
}

impl Summarizer for LlmClient {
    fn summarize(&self, content: &str, max_tokens: u32) -> Result<String> {
        self.complete(FILE_SUMMARIZE_PROMPT, &summarize_request(content), max_tokens)
    }
}

/// Pull generated text out of a response body.
///
/// Tries the chat-completion message, then the legacy completion text, and
/// falls back to the raw JSON.
pub fn extract_completion(value: &Value) -> String {
    let non_empty = |pointer: &str| {
        value
            .pointer(pointer)
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
    };

    non_empty("/choices/0/message/content")
        .or_else(|| non_empty("/choices/0/text"))
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}
