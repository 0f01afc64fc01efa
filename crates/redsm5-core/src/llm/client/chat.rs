//! Chat-completion requests

use super::types::LlmClient;
use crate::error::{Redsm5Error, Redsm5Result};
use crate::llm::backend::{ChatBackend, ChatCompletion, ChatRequest};
use crate::llm::error_utils::handle_http_error;
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, instrument};

impl LlmClient {
    /// Send one chat-completion request without retry or permit handling
    async fn send_chat(&self, request: &ChatRequest) -> Redsm5Result<ChatCompletion> {
        let url = self.chat_url();

        let mut body = json!({
            "model": request.model,
            "messages": request.messages,
            "stream": false,
        });
        if let Some(format) = &request.response_format {
            body["response_format"] = format.clone();
        }
        if let Some(temperature) = request.temperature {
            body["temperature"] = json!(temperature);
        }

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.config.api_key())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(handle_http_error(response, &url).await);
        }

        let payload: Value = response.json().await.map_err(|e| {
            Redsm5Error::llm_with_model(
                format!("Failed to parse chat response: {}", e),
                &request.model,
            )
        })?;

        parse_chat_payload(&payload, &request.model)
    }
}

/// Extract the first choice from an OpenAI-style chat response
pub(super) fn parse_chat_payload(payload: &Value, model: &str) -> Redsm5Result<ChatCompletion> {
    let choice = payload
        .get("choices")
        .and_then(|c| c.get(0))
        .ok_or_else(|| Redsm5Error::llm_with_model("Response contained no choices", model))?;

    let content = choice
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            Redsm5Error::llm_with_model("Response contained no message content", model)
        })?;

    let finish_reason = choice
        .get("finish_reason")
        .and_then(Value::as_str)
        .map(str::to_string);

    if let Some(usage) = payload.get("usage") {
        let prompt_tokens = usage.get("prompt_tokens").and_then(serde_json::Value::as_u64);
        let completion_tokens = usage
            .get("completion_tokens")
            .and_then(serde_json::Value::as_u64);
        debug!(prompt_tokens, completion_tokens, "chat request completed");
    }

    Ok(ChatCompletion {
        content: content.to_string(),
        finish_reason,
    })
}

#[async_trait]
impl ChatBackend for LlmClient {
    #[instrument(
        skip(self, request),
        fields(model = %request.model, messages = request.messages.len())
    )]
    async fn chat(&self, request: &ChatRequest) -> Redsm5Result<ChatCompletion> {
        self.execute_with_retry(|| async move {
            let _permit = self.permits.acquire().await?;
            self.send_chat(request).await
        })
        .await
    }
}
