//! Report generation for evaluation results
//!
//! Generates reports in JSON or Markdown.

mod json;
mod markdown;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;

use crate::judge::JudgeReport;
use crate::similarity::SimilarityReport;
use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use redsm5_core::generation::ResultRecord;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Json,
    Markdown,
}

impl FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            other => bail!("Unknown report format: {}", other),
        }
    }
}

/// Results of one evaluation run over a generation output file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub generated_at: DateTime<Utc>,
    /// Generation output that was evaluated
    pub results_file: String,
    pub records: usize,
    /// Records whose prediction is the generation sentinel
    pub generation_fallbacks: usize,
    pub similarity: Option<SimilarityReport>,
    pub judge: Option<JudgeReport>,
}

impl EvaluationReport {
    pub fn new(results_file: impl Into<String>, records: &[ResultRecord]) -> Self {
        Self {
            generated_at: Utc::now(),
            results_file: results_file.into(),
            records: records.len(),
            generation_fallbacks: records.iter().filter(|r| r.is_fallback()).count(),
            similarity: None,
            judge: None,
        }
    }

    pub fn with_similarity(mut self, similarity: SimilarityReport) -> Self {
        self.similarity = Some(similarity);
        self
    }

    pub fn with_judge(mut self, judge: JudgeReport) -> Self {
        self.judge = Some(judge);
        self
    }
}

/// Generate a report in the specified format
pub fn generate_report(report: &EvaluationReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => JsonReporter::generate(report),
        ReportFormat::Markdown => MarkdownReporter::generate(report),
    }
}
