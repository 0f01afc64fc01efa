//! Markdown report generation

use anyhow::Result;

use super::EvaluationReport;

/// Markdown report generator
pub struct MarkdownReporter;

fn optional(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.*}", precision, v))
}

impl MarkdownReporter {
    /// Generate a Markdown report
    pub fn generate(report: &EvaluationReport) -> Result<String> {
        let mut md = String::new();

        md.push_str("# ReDSM5 Explanation Evaluation\n\n");

        md.push_str("## Overview\n\n");
        md.push_str(&format!("- **Results file**: {}\n", report.results_file));
        md.push_str(&format!("- **Records**: {}\n", report.records));
        md.push_str(&format!(
            "- **Generation fallbacks**: {}\n",
            report.generation_fallbacks
        ));
        md.push_str(&format!(
            "- **Timestamp**: {}\n\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        if let Some(ref similarity) = report.similarity {
            md.push_str("## Embedding Similarity\n\n");
            md.push_str("| Metric | Value |\n|--------|-------|\n");
            md.push_str(&format!("| Model | {} |\n", similarity.model));
            md.push_str(&format!(
                "| Mean cosine similarity | {:.4} |\n",
                similarity.mean_similarity
            ));
            md.push_str(&format!(
                "| Mean (genuine embeddings only) | {} |\n",
                optional(similarity.genuine_mean_similarity, 4)
            ));
            md.push_str(&format!(
                "| Records with fallback embedding | {}/{} |\n\n",
                similarity.fallback_records, similarity.records
            ));
        }

        if let Some(ref judge) = report.judge {
            md.push_str("## LLM Judge\n\n");
            md.push_str("| Metric | Value |\n|--------|-------|\n");
            md.push_str(&format!("| Model | {} |\n", judge.model));
            md.push_str(&format!("| Mean composite (0-100) | {:.2} |\n", judge.mean_composite));
            md.push_str(&format!(
                "| Mean composite (genuine only) | {} |\n",
                optional(judge.genuine_mean_composite, 2)
            ));
            md.push_str(&format!("| Mean accuracy | {:.2} |\n", judge.mean_accuracy));
            md.push_str(&format!("| Mean coverage | {:.2} |\n", judge.mean_coverage));
            md.push_str(&format!("| Mean clarity | {:.2} |\n", judge.mean_clarity));
            md.push_str(&format!(
                "| Neutral fallbacks | {}/{} |\n\n",
                judge.fallbacks, judge.records
            ));
        }

        if report.similarity.is_none() && report.judge.is_none() {
            md.push_str("_No evaluation was run._\n");
        }

        Ok(md)
    }
}
