//! Configuration data model

use super::logging_config::LoggingConfig;
use super::timeouts;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Inference server endpoint settings
    pub provider: ProviderConfig,
    /// Model identifiers for each role
    pub models: ModelSelection,
    /// Concurrency limits
    pub concurrency: ConcurrencyConfig,
    /// Explanation generation settings
    pub generation: GenerationConfig,
    /// LLM-judge settings
    pub judge: JudgeConfig,
    /// Embedding evaluator settings
    pub embedding: EmbeddingConfig,
    /// Dataset split settings
    pub dataset: DatasetConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

/// Endpoint settings for the locally hosted, OpenAI-compatible server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL, without the `/v1` suffix
    pub base_url: String,
    /// API key; local servers accept any placeholder
    pub api_key: Option<String>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Transport-level retries for transient errors
    pub max_retries: u32,
    /// Base delay for exponential backoff; 0 disables waiting between retries
    pub retry_base_delay_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            api_key: None,
            connect_timeout_secs: timeouts::CONNECTION_SECS,
            request_timeout_secs: timeouts::REQUEST_SECS,
            max_retries: timeouts::MAX_RETRIES,
            retry_base_delay_ms: timeouts::RETRY_BASE_DELAY_MS,
        }
    }
}

impl ProviderConfig {
    /// Create a provider config pointing at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_base_delay_ms(mut self, delay_ms: u64) -> Self {
        self.retry_base_delay_ms = delay_ms;
        self
    }

    /// Base URL with any trailing slash removed
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// API key sent as bearer token
    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or("ollama")
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Model identifiers used by each pipeline stage
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSelection {
    /// Model producing explanations
    pub generation: String,
    /// Independent model rating explanations
    pub judge: String,
    /// Embedding model; `nomic-embed-text` yields 768-dimensional vectors
    pub embedding: String,
}

impl Default for ModelSelection {
    fn default() -> Self {
        Self {
            generation: "llama3.1:8b".to_string(),
            judge: "qwen2.5:14b".to_string(),
            embedding: "nomic-embed-text".to_string(),
        }
    }
}

/// Concurrency limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcurrencyConfig {
    /// Capacity of the shared permit pool bounding in-flight requests
    pub max_concurrent_requests: usize,
    /// Workers used by the generation dispatcher; 1 processes examples in order
    pub dispatch_workers: usize,
    /// Workers used by the evaluators; defaults to the permit capacity
    pub evaluation_workers: Option<usize>,
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: 5,
            dispatch_workers: 1,
            evaluation_workers: None,
        }
    }
}

impl ConcurrencyConfig {
    /// Effective evaluator fan-out
    pub fn evaluation_workers(&self) -> usize {
        self.evaluation_workers
            .unwrap_or(self.max_concurrent_requests)
            .max(1)
    }
}

/// Explanation generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Attempts per example before the sentinel is used; invalid output is re-asked
    pub max_attempts: u32,
    /// Number of training examples used as few-shot demonstrations
    pub few_shot_count: usize,
    pub temperature: Option<f32>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            few_shot_count: 3,
            temperature: None,
        }
    }
}

/// Weights of the judge rubric axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JudgeWeights {
    pub accuracy: f64,
    pub coverage: f64,
    pub clarity: f64,
}

impl Default for JudgeWeights {
    fn default() -> Self {
        Self {
            accuracy: 0.40,
            coverage: 0.30,
            clarity: 0.30,
        }
    }
}

impl JudgeWeights {
    pub fn sum(&self) -> f64 {
        self.accuracy + self.coverage + self.clarity
    }
}

/// LLM-judge settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeConfig {
    pub weights: JudgeWeights,
    /// Attempts per record before the neutral score is used
    pub max_attempts: u32,
    pub temperature: Option<f32>,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            weights: JudgeWeights::default(),
            max_attempts: 5,
            temperature: Some(0.0),
        }
    }
}

/// Embedding evaluator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Length of the zero vector substituted for a missing embedding
    pub dimension: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self { dimension: 768 }
    }
}

/// Dataset split settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Fraction of posts placed in the test split
    pub test_fraction: f64,
    /// Shuffle seed; the same seed always yields the same split
    pub seed: u64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
        }
    }
}
