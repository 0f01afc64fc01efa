//! Generation data types

use crate::dataset::Example;
use crate::llm::StructuredOutput;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Text stored in both fields when no valid explanation could be produced
pub const SENTINEL: &str = "Error during explanation.";

/// Structured output of the generation model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedExplanation {
    pub explanation: String,
    pub chain_of_thought: String,
}

impl GeneratedExplanation {
    pub fn new(explanation: impl Into<String>, chain_of_thought: impl Into<String>) -> Self {
        Self {
            explanation: explanation.into(),
            chain_of_thought: chain_of_thought.into(),
        }
    }

    pub fn sentinel() -> Self {
        Self::new(SENTINEL, SENTINEL)
    }

    pub fn is_sentinel(&self) -> bool {
        self.explanation == SENTINEL && self.chain_of_thought == SENTINEL
    }
}

impl StructuredOutput for GeneratedExplanation {
    const NAME: &'static str = "generated_explanation";

    fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "explanation": {
                    "type": "string",
                    "description": "Clinical rationale linking the post to DSM-5 depression symptoms"
                },
                "chain_of_thought": {
                    "type": "string",
                    "description": "Step-by-step reasoning that led to the explanation"
                }
            },
            "required": ["explanation", "chain_of_thought"],
            "additionalProperties": false
        })
    }

    fn validate(&self) -> Result<(), String> {
        if self.explanation.trim().is_empty() {
            return Err("explanation must not be empty".to_string());
        }
        if self.chain_of_thought.trim().is_empty() {
            return Err("chain_of_thought must not be empty".to_string());
        }
        Ok(())
    }
}

/// One line of the generation output file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub text: String,
    pub explanation_true: String,
    pub explanation_predicted: String,
    pub chain_of_thought: String,
}

impl ResultRecord {
    pub fn new(example: Example, generated: GeneratedExplanation) -> Self {
        Self {
            text: example.text,
            explanation_true: example.reference_explanation,
            explanation_predicted: generated.explanation,
            chain_of_thought: generated.chain_of_thought,
        }
    }

    /// Whether the prediction is the sentinel rather than model output
    pub fn is_fallback(&self) -> bool {
        self.explanation_predicted == SENTINEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::structured::parse_structured;

    #[test]
    fn test_empty_field_fails_validation() {
        assert!(parse_structured::<GeneratedExplanation>(
            r#"{"explanation": "  ", "chain_of_thought": "reasoning"}"#
        )
        .is_err());
        assert!(parse_structured::<GeneratedExplanation>(r#"{"explanation": "x"}"#).is_err());
    }

    #[test]
    fn test_record_serializes_output_field_names() {
        let record = ResultRecord::new(
            Example::new("post", "reference"),
            GeneratedExplanation::sentinel(),
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["explanation_true"], "reference");
        assert_eq!(value["explanation_predicted"], SENTINEL);
        assert!(record.is_fallback());
    }
}
