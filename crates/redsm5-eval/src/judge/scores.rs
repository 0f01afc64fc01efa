use redsm5_core::config::JudgeWeights;
use redsm5_core::llm::StructuredOutput;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Justification attached to the neutral score used when judging fails
pub const FALLBACK_JUSTIFICATION: &str = "Evaluation failed; neutral score assigned.";

const MIN_SCORE: u8 = 1;
const MAX_SCORE: u8 = 5;

/// Rubric scores for one prediction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeScores {
    pub accuracy: u8,
    pub coverage: u8,
    pub clarity: u8,
    /// Free-text justification
    pub explanation: String,
}

impl JudgeScores {
    pub fn new(accuracy: u8, coverage: u8, clarity: u8, explanation: impl Into<String>) -> Self {
        Self {
            accuracy,
            coverage,
            clarity,
            explanation: explanation.into(),
        }
    }

    /// Scores substituted when no valid judgement was obtained
    pub fn neutral() -> Self {
        Self::new(3, 3, 3, FALLBACK_JUSTIFICATION)
    }

    /// Weighted composite in [0, 100]
    pub fn composite(&self, weights: &JudgeWeights) -> f64 {
        let rescale =
            |score: u8| (score as f64 - MIN_SCORE as f64) / (MAX_SCORE - MIN_SCORE) as f64;
        let weighted = weights.accuracy * rescale(self.accuracy)
            + weights.coverage * rescale(self.coverage)
            + weights.clarity * rescale(self.clarity);
        (100.0 * weighted).clamp(0.0, 100.0)
    }
}

impl StructuredOutput for JudgeScores {
    const NAME: &'static str = "judge_scores";

    fn json_schema() -> Value {
        let axis = |description: &str| {
            json!({
                "type": "integer",
                "minimum": MIN_SCORE,
                "maximum": MAX_SCORE,
                "description": description
            })
        };
        json!({
            "type": "object",
            "properties": {
                "accuracy": axis("Does the candidate identify the same symptoms as the reference?"),
                "coverage": axis("Does the candidate mention all evidence cited by the reference?"),
                "clarity": axis("Is the candidate clear and well organised?"),
                "explanation": {"type": "string", "description": "Short justification of the scores"}
            },
            "required": ["accuracy", "coverage", "clarity", "explanation"],
            "additionalProperties": false
        })
    }

    fn validate(&self) -> Result<(), String> {
        for (axis, score) in [
            ("accuracy", self.accuracy),
            ("coverage", self.coverage),
            ("clarity", self.clarity),
        ] {
            if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
                return Err(format!(
                    "{} must be between {} and {} (got {})",
                    axis, MIN_SCORE, MAX_SCORE, score
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redsm5_core::llm::structured::parse_structured;

    #[test]
    fn test_composite_reference_points() {
        let weights = JudgeWeights::default();
        assert!((JudgeScores::new(3, 3, 3, "").composite(&weights) - 50.0).abs() < 1e-9);
        assert!((JudgeScores::new(5, 5, 5, "").composite(&weights) - 100.0).abs() < 1e-9);
        assert_eq!(JudgeScores::new(1, 1, 1, "").composite(&weights), 0.0);
        // 0.4 * 1 + 0.3 * 0 + 0.3 * 0.5
        assert!((JudgeScores::new(5, 1, 3, "").composite(&weights) - 55.0).abs() < 1e-9);
    }

    #[test]
    fn test_neutral_fallback() {
        let neutral = JudgeScores::neutral();
        assert_eq!(neutral.explanation, FALLBACK_JUSTIFICATION);
        assert!((neutral.composite(&JudgeWeights::default()) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_scores_fail_validation() {
        let raw = r#"{"accuracy": 6, "coverage": 3, "clarity": 3, "explanation": "x"}"#;
        assert!(parse_structured::<JudgeScores>(raw).is_err());
        let raw = r#"{"accuracy": 0, "coverage": 3, "clarity": 3, "explanation": "x"}"#;
        assert!(parse_structured::<JudgeScores>(raw).is_err());
        let raw = r#"{"accuracy": 4, "coverage": 3, "clarity": 2, "explanation": "ok"}"#;
        assert_eq!(parse_structured::<JudgeScores>(raw).unwrap(), JudgeScores::new(4, 3, 2, "ok"));
    }
}
