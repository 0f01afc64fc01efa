//! ReDSM5 Core Library
//!
//! This crate provides the explanation-generation side of the ReDSM5
//! pipeline: configuration, the rate-limited LLM client, schema-validated
//! structured output, dataset handling and the generation dispatcher.

pub mod concurrency;
pub mod config;
pub mod context;
pub mod dataset;
pub mod error;
pub mod generation;
pub mod llm;
pub mod outcome;

// Re-export commonly used types
pub use concurrency::{PermitPool, WorkerPool};
pub use config::{ConfigLoader, PipelineConfig};
pub use context::PipelineContext;
pub use dataset::{DatasetSplit, Example, LabeledPost};
pub use error::{Redsm5Error, Redsm5Result};
pub use generation::{
    DispatchSummary, Dispatcher, ExplanationGenerator, GeneratedExplanation, ResultRecord,
    ResultSink,
};
pub use llm::{ChatBackend, EmbeddingBackend, LlmClient};
pub use outcome::{FailureKind, Outcome};
