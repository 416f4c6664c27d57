//! Program generation collaborator
//!
//! The core produces a rendered prompt before this call and consumes the
//! returned prose after it; the exchange itself is an opaque two-message
//! chat request against an Ollama-compatible backend. No retries and no
//! response-shape validation happen here: a failure surfaces as a single
//! generic error to the caller.

use crate::config::AiConfig;
use async_trait::async_trait;
use fitcoach_shared::MAX_GENERATION_TOKENS;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors from the external generation call
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from generation backend: {0}")]
    UnexpectedResponse(String),
}

/// External text-generation collaborator
///
/// Implemented by the real chat client in production and by fixed-output
/// mocks in tests; handlers only see this trait.
#[async_trait]
pub trait ProgramGenerator: Send + Sync {
    /// Run the fixed two-message exchange and return the raw prose
    async fn generate(&self, system: &str, user: &str) -> Result<String, GenerationError>;
}

/// Chat client for an Ollama-compatible `/api/chat` endpoint
pub struct OllamaGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatOptions {
    num_predict: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    options: ChatOptions,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: Option<ChatResponseMessage>,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl OllamaGenerator {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl ProgramGenerator for OllamaGenerator {
    async fn generate(&self, system: &str, user: &str) -> Result<String, GenerationError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            stream: false,
            options: ChatOptions {
                num_predict: MAX_GENERATION_TOKENS,
            },
        };

        let url = format!("{}/api/chat", self.base_url);
        debug!(model = %self.model, "Requesting program generation");

        let mut builder = self.client.post(&url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?.error_for_status()?;
        let body: ChatResponse = response.json().await?;

        match body.message {
            Some(message) if !message.content.is_empty() => Ok(message.content),
            _ => Err(GenerationError::UnexpectedResponse(
                "missing message content".to_string(),
            )),
        }
    }
}
