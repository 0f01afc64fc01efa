use serde::{Deserialize, Serialize};

/// A post with its reference explanation
///
/// Stored on disk as `{text, explanation}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub text: String,
    #[serde(rename = "explanation")]
    pub reference_explanation: String,
}

impl Example {
    pub fn new(text: impl Into<String>, reference_explanation: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reference_explanation: reference_explanation.into(),
        }
    }
}
