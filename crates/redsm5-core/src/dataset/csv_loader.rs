//! Annotated corpus CSV loading

use super::example::Example;
use crate::error::{Redsm5Error, Redsm5Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// One row of the annotated corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledPost {
    pub text: String,
    /// Symptom tags; semicolon separated in the file
    pub labels: Vec<String>,
    pub explanation: String,
}

impl LabeledPost {
    pub fn to_example(&self) -> Example {
        Example::new(self.text.clone(), self.explanation.clone())
    }
}

#[derive(Debug, Deserialize)]
struct Row {
    text: String,
    #[serde(default)]
    labels: String,
    #[serde(default)]
    explanation: String,
}

fn split_labels(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load the `text,labels,explanation` corpus file
///
/// Rows with empty text are skipped with a warning.
pub fn load_labeled_posts(path: &Path) -> Redsm5Result<Vec<LabeledPost>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| Redsm5Error::io_with_path(format!("Failed to open dataset: {}", e), path))?;

    let mut posts = Vec::new();
    for (idx, result) in reader.deserialize::<Row>().enumerate() {
        let row = result?;
        if row.text.trim().is_empty() {
            warn!(row = idx + 1, "skipping dataset row with empty text");
            continue;
        }
        posts.push(LabeledPost {
            labels: split_labels(&row.labels),
            text: row.text,
            explanation: row.explanation,
        });
    }

    debug!("Loaded {} posts from {}", posts.len(), path.display());
    Ok(posts)
}
