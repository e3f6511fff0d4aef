//! Persona text generation via an OpenAI-compatible chat completions API.

use super::error::ClientError;
use super::traits::TextGenerator;
use crate::config::KarenConfig;
use crate::types::*;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_TOKENS: u32 = 300;
const DEFAULT_TEMPERATURE: f64 = 0.8;

/// Chat completions client. Without an API key it never touches the network.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    base_url: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    temperature: f64,
    timeout: Duration,
    http: reqwest::Client,
}

// -- OpenAI-compatible request/response types --------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiClient {
    /// Create a client. An empty `api_key` disables generation.
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        let api_key = api_key.trim();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: (!api_key.is_empty()).then(|| api_key.to_string()),
            model: model.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &KarenConfig) -> Self {
        Self::new(
            &config.openai_api_url,
            &config.openai_api_key,
            &config.openai_model,
        )
        .with_timeout(Duration::from_secs(config.openai_timeout_secs))
        .with_sampling(config.max_tokens, config.temperature)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_sampling(mut self, max_tokens: u32, temperature: f64) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    /// Run one chat completion and return the raw content of the first choice.
    pub async fn chat(&self, api_key: &str, messages: &[ChatMessage]) -> Result<String, ClientError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let request = ChatRequest {
            model: &self.model,
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!("Inference request to model: {}", self.model);

        let resp = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(e, self.timeout))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ClientError::from_reqwest(e, self.timeout))?;
        let body: ChatResponse =
            serde_json::from_slice(&bytes).map_err(|e| ClientError::Malformed(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ClientError::Malformed("no completion content in choices".into()))
    }
}

/// System message (only when a persona is given) followed by the user prompt.
pub fn build_messages(prompt: &str, persona: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(2);
    if !persona.is_empty() {
        messages.push(ChatMessage::system(persona));
    }
    messages.push(ChatMessage::user(prompt));
    messages
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate(&self, prompt: &str, persona: &str) -> GenerationResult {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("No OpenAI API key configured, using fallback response");
            return GenerationResult::Unavailable;
        };

        let messages = build_messages(prompt, persona);
        match self.chat(api_key, &messages).await {
            Ok(content) => {
                let result = GenerationResult::from_completion(&content);
                if result == GenerationResult::Unavailable {
                    error!("OpenAI API returned an empty completion");
                }
                result
            }
            Err(e) => {
                error!("OpenAI API error: {}", e);
                GenerationResult::Unavailable
            }
        }
    }
}
