//! Embedding similarity evaluation

use crate::metrics::{mean, mean_unflagged};
use redsm5_core::concurrency::WorkerPool;
use redsm5_core::generation::ResultRecord;
use redsm5_core::llm::EmbeddingBackend;
use redsm5_core::{FailureKind, Outcome, PipelineContext};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Cosine similarity clamped to [-1, 1]
///
/// Returns 0.0 when either vector has zero norm or the lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        warn!(left = a.len(), right = b.len(), "embedding dimensions differ");
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| *x as f64 * *y as f64).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

/// Aggregate of the embedding pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityReport {
    pub model: String,
    pub records: usize,
    /// Mean over all records, fallbacks included; 0.0 for no records
    pub mean_similarity: f64,
    /// Records where at least one embedding was replaced by a zero vector
    pub fallback_records: usize,
    /// Mean over records with two genuine embeddings
    pub genuine_mean_similarity: Option<f64>,
    /// Per-record similarity in input order
    pub similarities: Vec<f64>,
}

/// Embeds reference and prediction of each record and compares them
pub struct EmbeddingEvaluator {
    backend: Arc<dyn EmbeddingBackend>,
    model: String,
    dimension: usize,
    pool: WorkerPool,
}

impl EmbeddingEvaluator {
    pub fn new(backend: Arc<dyn EmbeddingBackend>, context: &PipelineContext) -> Self {
        let config = context.config();
        Self {
            backend,
            model: config.models.embedding.clone(),
            dimension: config.embedding.dimension,
            pool: WorkerPool::new(config.concurrency.evaluation_workers()),
        }
    }

    /// Embed `text`, substituting a zero vector on failure or an empty response
    pub async fn embed(&self, text: &str) -> Outcome<Vec<f32>> {
        match self.backend.embed(&self.model, text).await {
            Ok(vector) if !vector.is_empty() => Outcome::Completed(vector),
            Ok(_) => {
                warn!(model = %self.model, "empty embedding, using zero vector");
                Outcome::Fallback {
                    value: vec![0.0; self.dimension],
                    kind: FailureKind::EmptyEmbedding,
                    message: "embedding endpoint returned no vector".to_string(),
                }
            }
            Err(error) => {
                warn!(model = %self.model, error = %error, "embedding failed, using zero vector");
                Outcome::fallback(vec![0.0; self.dimension], &error)
            }
        }
    }

    /// Similarity of one reference/prediction pair; the flag marks a fallback embedding
    pub async fn score_pair(&self, reference: &str, prediction: &str) -> (f64, bool) {
        let (reference, prediction) = tokio::join!(self.embed(reference), self.embed(prediction));
        let fallback = reference.is_fallback() || prediction.is_fallback();
        (cosine_similarity(reference.value(), prediction.value()), fallback)
    }

    #[instrument(skip_all, fields(records = records.len(), model = %self.model))]
    pub async fn evaluate(&self, records: &[ResultRecord]) -> SimilarityReport {
        let scored = self
            .pool
            .run(records.iter().collect(), |_, record| async move {
                self.score_pair(&record.explanation_true, &record.explanation_predicted)
                    .await
            })
            .await;

        let report = SimilarityReport {
            model: self.model.clone(),
            records: scored.len(),
            mean_similarity: mean(scored.iter().map(|(s, _)| *s)),
            fallback_records: scored.iter().filter(|(_, f)| *f).count(),
            genuine_mean_similarity: mean_unflagged(scored.iter().copied()),
            similarities: scored.into_iter().map(|(s, _)| s).collect(),
        };

        info!(
            mean = report.mean_similarity,
            fallbacks = report.fallback_records,
            "embedding evaluation finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use redsm5_core::config::PipelineConfig;
    use redsm5_core::dataset::Example;
    use redsm5_core::generation::GeneratedExplanation;
    use redsm5_core::{Redsm5Error, Redsm5Result};

    /// Maps known texts to fixed vectors; unknown text fails, "empty" yields no vector
    struct TableBackend;

    #[async_trait]
    impl EmbeddingBackend for TableBackend {
        async fn embed(&self, _model: &str, input: &str) -> Redsm5Result<Vec<f32>> {
            match input {
                "x-axis" => Ok(vec![1.0, 0.0, 0.0]),
                "x-axis again" => Ok(vec![2.0, 0.0, 0.0]),
                "y-axis" => Ok(vec![0.0, 1.0, 0.0]),
                "minus x" => Ok(vec![-1.0, 0.0, 0.0]),
                "empty" => Ok(Vec::new()),
                _ => Err(Redsm5Error::http_status("refused", "http://x", 503)),
            }
        }
    }

    fn evaluator() -> EmbeddingEvaluator {
        EmbeddingEvaluator::new(
            Arc::new(TableBackend),
            &PipelineContext::new(PipelineConfig::default()),
        )
    }

    fn record(reference: &str, prediction: &str) -> ResultRecord {
        ResultRecord::new(
            Example::new("post", reference),
            GeneratedExplanation::new(prediction, "cot"),
        )
    }

    #[test]
    fn test_cosine_properties() {
        assert!((cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]) - 1.0).abs() < 1e-9);
        assert!((cosine_similarity(&[1.0, 0.0], &[-3.0, 0.0]) + 1.0).abs() < 1e-9);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0; 768], &[0.0; 768]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0]), 0.0);
    }

    #[tokio::test]
    async fn test_empty_embedding_becomes_zero_vector() {
        let outcome = evaluator().embed("empty").await;
        assert_eq!(outcome.failure_kind(), Some(FailureKind::EmptyEmbedding));
        assert_eq!(outcome.value().len(), 768);
        assert!(outcome.value().iter().all(|v| *v == 0.0));
    }

    #[tokio::test]
    async fn test_evaluate_aggregates_and_counts_fallbacks() {
        let records = vec![
            record("x-axis", "x-axis again"),
            record("x-axis", "y-axis"),
            record("x-axis", "minus x"),
            record("x-axis", "unreachable"),
        ];
        let report = evaluator().evaluate(&records).await;

        assert_eq!(report.records, 4);
        assert_eq!(report.fallback_records, 1);
        assert_eq!(report.similarities.len(), 4);
        assert!((report.similarities[0] - 1.0).abs() < 1e-9);
        assert_eq!(report.similarities[3], 0.0);
        assert!((report.mean_similarity - 0.0).abs() < 1e-9);
        assert!(report.genuine_mean_similarity.unwrap().abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_evaluate_is_repeatable_and_empty_is_zero() {
        let records = vec![record("x-axis", "x-axis again"), record("y-axis", "x-axis")];
        let evaluator = evaluator();
        let first = evaluator.evaluate(&records).await;
        let second = evaluator.evaluate(&records).await;
        assert_eq!(first.mean_similarity, second.mean_similarity);

        let empty = evaluator.evaluate(&[]).await;
        assert_eq!(empty.mean_similarity, 0.0);
        assert_eq!(empty.genuine_mean_similarity, None);
    }
}
