//! Configuration validation

use super::model::PipelineConfig;
use crate::error::{Redsm5Error, Redsm5Result};

const WEIGHT_TOLERANCE: f64 = 1e-6;

impl PipelineConfig {
    /// Check the configuration for values the pipeline cannot run with
    pub fn validate(&self) -> Redsm5Result<()> {
        let mut problems = Vec::new();

        if self.provider.base_url.trim().is_empty() {
            problems.push("provider.base_url must not be empty".to_string());
        } else if !self.provider.base_url.starts_with("http://")
            && !self.provider.base_url.starts_with("https://")
        {
            problems.push(format!(
                "provider.base_url must start with http:// or https:// (got '{}')",
                self.provider.base_url
            ));
        }

        for (role, model) in [
            ("generation", &self.models.generation),
            ("judge", &self.models.judge),
            ("embedding", &self.models.embedding),
        ] {
            if model.trim().is_empty() {
                problems.push(format!("models.{} must not be empty", role));
            }
        }

        if self.concurrency.max_concurrent_requests == 0 {
            problems.push("concurrency.max_concurrent_requests must be at least 1".to_string());
        }
        if self.concurrency.dispatch_workers == 0 {
            problems.push("concurrency.dispatch_workers must be at least 1".to_string());
        }
        if self.concurrency.evaluation_workers == Some(0) {
            problems.push("concurrency.evaluation_workers must be at least 1".to_string());
        }

        if self.generation.max_attempts == 0 || self.judge.max_attempts == 0 {
            problems.push("max_attempts must be at least 1".to_string());
        }

        let weights = &self.judge.weights;
        if [weights.accuracy, weights.coverage, weights.clarity]
            .iter()
            .any(|w| !w.is_finite() || *w < 0.0)
        {
            problems.push("judge.weights must be finite and non-negative".to_string());
        } else if (weights.sum() - 1.0).abs() > WEIGHT_TOLERANCE {
            problems.push(format!(
                "judge.weights must sum to 1.0 (got {:.4})",
                weights.sum()
            ));
        }

        if self.embedding.dimension == 0 {
            problems.push("embedding.dimension must be at least 1".to_string());
        }

        let fraction = self.dataset.test_fraction;
        if !(fraction > 0.0 && fraction < 1.0) {
            problems.push(format!(
                "dataset.test_fraction must be in (0, 1) (got {})",
                fraction
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(Redsm5Error::config_with_context(
                problems.join("; "),
                format!("{} invalid setting(s)", problems.len()),
            ))
        }
    }
}
