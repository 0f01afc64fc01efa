//! Dependencies shared by every pipeline stage

use crate::concurrency::PermitPool;
use crate::config::PipelineConfig;
use crate::dataset::Example;
use crate::error::Redsm5Result;
use crate::llm::LlmClient;
use std::sync::Arc;

/// Configuration, permit pool and few-shot demonstrations for one run
///
/// Clones share the same permit pool, so every client created from any clone
/// counts against the same in-flight limit.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    config: Arc<PipelineConfig>,
    permits: PermitPool,
    few_shot: Arc<Vec<Example>>,
}

impl PipelineContext {
    pub fn new(config: PipelineConfig) -> Self {
        let permits = PermitPool::new(config.concurrency.max_concurrent_requests);
        Self {
            config: Arc::new(config),
            permits,
            few_shot: Arc::new(Vec::new()),
        }
    }

    /// Use `examples` as few-shot demonstrations, keeping at most the configured count
    pub fn with_few_shot(mut self, examples: &[Example]) -> Self {
        let count = self.config.generation.few_shot_count.min(examples.len());
        self.few_shot = Arc::new(examples[..count].to_vec());
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn permits(&self) -> &PermitPool {
        &self.permits
    }

    pub fn few_shot(&self) -> &[Example] {
        &self.few_shot
    }

    /// HTTP client bound to this context's endpoint and permit pool
    pub fn client(&self) -> Redsm5Result<LlmClient> {
        LlmClient::new(self.config.provider.clone(), self.permits.clone())
    }
}
