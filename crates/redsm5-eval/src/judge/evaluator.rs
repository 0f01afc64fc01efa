//! Batch judging

use super::prompt::judge_messages;
use super::scores::JudgeScores;
use crate::metrics::{mean, mean_unflagged};
use redsm5_core::concurrency::WorkerPool;
use redsm5_core::config::JudgeWeights;
use redsm5_core::generation::ResultRecord;
use redsm5_core::llm::{ChatBackend, ChatRequest, request_structured};
use redsm5_core::{Outcome, PipelineContext};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Aggregate of the judge pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeReport {
    pub model: String,
    pub records: usize,
    /// Mean composite over all records, neutral fallbacks included
    pub mean_composite: f64,
    pub mean_accuracy: f64,
    pub mean_coverage: f64,
    pub mean_clarity: f64,
    /// Records scored with the neutral fallback
    pub fallbacks: usize,
    /// Mean composite over genuine judgements only
    pub genuine_mean_composite: Option<f64>,
    /// Per-record composite in input order
    pub composites: Vec<f64>,
}

/// Rates predictions with a second model
pub struct JudgeEvaluator {
    backend: Arc<dyn ChatBackend>,
    model: String,
    weights: JudgeWeights,
    max_attempts: u32,
    temperature: Option<f32>,
    pool: WorkerPool,
}

impl JudgeEvaluator {
    pub fn new(backend: Arc<dyn ChatBackend>, context: &PipelineContext) -> Self {
        let config = context.config();
        Self {
            backend,
            model: config.models.judge.clone(),
            weights: config.judge.weights,
            max_attempts: config.judge.max_attempts,
            temperature: config.judge.temperature,
            pool: WorkerPool::new(config.concurrency.evaluation_workers()),
        }
    }

    /// Judge with a different model than the configured one
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn weights(&self) -> &JudgeWeights {
        &self.weights
    }

    /// Rate `candidate` against `reference`
    ///
    /// Any failure after the retry budget yields the neutral (3, 3, 3) score.
    pub async fn judge(&self, reference: &str, candidate: &str) -> Outcome<JudgeScores> {
        let request = ChatRequest::new(self.model.clone(), judge_messages(reference, candidate))
            .with_temperature(self.temperature);

        match request_structured::<JudgeScores>(self.backend.as_ref(), request, self.max_attempts)
            .await
        {
            Ok(scores) => Outcome::Completed(scores),
            Err(error) => {
                warn!(
                    model = %self.model,
                    error = %error,
                    "judging failed, assigning neutral score"
                );
                Outcome::fallback(JudgeScores::neutral(), &error)
            }
        }
    }

    /// Judge every record; all calls are issued at once up to the worker count
    #[instrument(skip_all, fields(records = records.len(), model = %self.model))]
    pub async fn evaluate(&self, records: &[ResultRecord]) -> JudgeReport {
        let outcomes = self
            .pool
            .run(records.iter().collect(), |_, record| async move {
                self.judge(&record.explanation_true, &record.explanation_predicted)
                    .await
            })
            .await;

        let composites: Vec<(f64, bool)> = outcomes
            .iter()
            .map(|o| (o.value().composite(&self.weights), o.is_fallback()))
            .collect();
        let axis_mean = |axis: fn(&JudgeScores) -> u8| {
            mean(outcomes.iter().map(|o| axis(o.value()) as f64))
        };

        let report = JudgeReport {
            model: self.model.clone(),
            records: outcomes.len(),
            mean_composite: mean(composites.iter().map(|(c, _)| *c)),
            mean_accuracy: axis_mean(|s| s.accuracy),
            mean_coverage: axis_mean(|s| s.coverage),
            mean_clarity: axis_mean(|s| s.clarity),
            fallbacks: composites.iter().filter(|(_, f)| *f).count(),
            genuine_mean_composite: mean_unflagged(composites.iter().copied()),
            composites: composites.into_iter().map(|(c, _)| c).collect(),
        };

        info!(
            mean_composite = report.mean_composite,
            fallbacks = report.fallbacks,
            "judge evaluation finished"
        );
        report
    }
}
