//! LLM client type definitions

use crate::concurrency::PermitPool;
use crate::config::ProviderConfig;
use reqwest::Client;

/// Client for the chat-completion and embedding endpoints
///
/// Clones share the HTTP connection pool and the permit pool.
///
/// # Examples
///
/// ```no_run
/// use redsm5_core::concurrency::PermitPool;
/// use redsm5_core::config::ProviderConfig;
/// use redsm5_core::llm::{ChatBackend, ChatMessage, ChatRequest, LlmClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = LlmClient::new(ProviderConfig::default(), PermitPool::new(5))?;
/// let request = ChatRequest::new("llama3.1:8b", vec![ChatMessage::user("Hello")]);
/// let completion = client.chat(&request).await?;
/// println!("{}", completion.content);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LlmClient {
    pub(super) http_client: Client,
    pub(super) config: ProviderConfig,
    pub(super) permits: PermitPool,
}

impl LlmClient {
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn permits(&self) -> &PermitPool {
        &self.permits
    }

    pub(super) fn chat_url(&self) -> String {
        format!("{}/v1/chat/completions", self.config.base_url())
    }

    pub(super) fn embed_url(&self) -> String {
        format!("{}/api/embed", self.config.base_url())
    }
}
