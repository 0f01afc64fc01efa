//! Backend traits for chat completion and embeddings

use super::messages::ChatMessage;
use crate::error::Redsm5Result;
use async_trait::async_trait;
use serde_json::Value;

/// A chat-completion request
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    /// OpenAI `response_format` hint, e.g. a JSON schema
    pub response_format: Option<Value>,
    pub temperature: Option<f32>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            response_format: None,
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Content and finish reason of the first completion choice
#[derive(Debug, Clone, PartialEq)]
pub struct ChatCompletion {
    pub content: String,
    pub finish_reason: Option<String>,
}

impl ChatCompletion {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            finish_reason: Some("stop".to_string()),
        }
    }

    /// Whether generation stopped at the token limit
    pub fn is_truncated(&self) -> bool {
        self.finish_reason.as_deref() == Some("length")
    }
}

/// Chat-completion endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn chat(&self, request: &ChatRequest) -> Redsm5Result<ChatCompletion>;
}

/// Embedding endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    /// Embed `input`; an empty vector means the endpoint returned no embedding
    async fn embed(&self, model: &str, input: &str) -> Redsm5Result<Vec<f32>>;
}
