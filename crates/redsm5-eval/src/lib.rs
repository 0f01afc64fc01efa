//! ReDSM5 Explanation Evaluation
//!
//! This crate scores generated explanations against their references in two
//! independent passes:
//!
//! - **Embedding similarity**: cosine similarity between the embeddings of
//!   the reference and the prediction, averaged over all records
//! - **LLM judge**: a second model rates accuracy, coverage and clarity on a
//!   1-5 scale, combined into a weighted 0-100 composite
//!
//! Both passes substitute fallback values for failed calls and report how
//! many records were affected.
//!
//! # Example
//!
//! ```rust,ignore
//! use redsm5_eval::{EmbeddingEvaluator, JudgeEvaluator};
//!
//! let records = read_jsonl::<ResultRecord>(path).await?;
//! let similarity = EmbeddingEvaluator::new(client.clone(), &context).evaluate(&records).await;
//! let judge = JudgeEvaluator::new(client, &context).evaluate(&records).await;
//! ```

pub mod judge;
pub mod metrics;
pub mod report;
pub mod similarity;

pub use judge::{JudgeEvaluator, JudgeReport, JudgeScores};
pub use report::{EvaluationReport, ReportFormat, generate_report};
pub use similarity::{EmbeddingEvaluator, SimilarityReport, cosine_similarity};
