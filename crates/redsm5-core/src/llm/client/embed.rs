//! Embedding requests

use super::types::LlmClient;
use crate::error::{Redsm5Error, Redsm5Result};
use crate::llm::backend::EmbeddingBackend;
use crate::llm::error_utils::handle_http_error;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    #[serde(default)]
    embeddings: Vec<Vec<f32>>,
}

impl LlmClient {
    async fn send_embed(&self, model: &str, input: &str) -> Redsm5Result<Vec<f32>> {
        let url = self.embed_url();

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.config.api_key())
            .json(&json!({ "model": model, "input": input }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(handle_http_error(response, &url).await);
        }

        let payload: EmbedResponse = response.json().await.map_err(|e| {
            Redsm5Error::llm_with_model(format!("Failed to parse embedding response: {}", e), model)
        })?;

        Ok(payload.embeddings.into_iter().next().unwrap_or_default())
    }
}

#[async_trait]
impl EmbeddingBackend for LlmClient {
    #[instrument(skip(self, input), fields(model = %model, input_len = input.len()))]
    async fn embed(&self, model: &str, input: &str) -> Redsm5Result<Vec<f32>> {
        self.execute_with_retry(|| async move {
            let _permit = self.permits.acquire().await?;
            self.send_embed(model, input).await
        })
        .await
    }
}
