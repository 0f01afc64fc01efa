//! LLM client constructor

use super::types::LlmClient;
use crate::concurrency::PermitPool;
use crate::config::ProviderConfig;
use crate::error::{Redsm5Error, Redsm5Result};
use reqwest::Client;
use tracing::debug;

impl LlmClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ProviderConfig, permits: PermitPool) -> Redsm5Result<Self> {
        let http_client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| Redsm5Error::config(format!("Failed to create HTTP client: {}", e)))?;

        debug!(
            base_url = %config.base_url(),
            connect_timeout_secs = config.connect_timeout_secs,
            request_timeout_secs = config.request_timeout_secs,
            max_concurrent = permits.capacity(),
            "created LLM client"
        );

        Ok(Self {
            http_client,
            config,
            permits,
        })
    }
}
