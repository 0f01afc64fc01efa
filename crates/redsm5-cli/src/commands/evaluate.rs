//! Evaluation command

use crate::args::EvaluationPass;
use crate::console::CliConsole;
use crate::progress;
use redsm5_core::config::PipelineConfig;
use redsm5_core::dataset::read_jsonl;
use redsm5_core::error::{Redsm5Error, Redsm5Result};
use redsm5_core::generation::ResultRecord;
use redsm5_core::PipelineContext;
use redsm5_eval::{
    EmbeddingEvaluator, EvaluationReport, JudgeEvaluator, ReportFormat, generate_report,
};
use std::path::Path;
use std::sync::Arc;

/// Run the selected evaluation passes over a results file and emit a report
pub async fn run(
    config: PipelineConfig,
    pass: EvaluationPass,
    results: &Path,
    format: ReportFormat,
    report_path: Option<&Path>,
    verbose: bool,
) -> Redsm5Result<()> {
    let console = CliConsole::new(verbose);

    let records: Vec<ResultRecord> = read_jsonl(results).await?;
    if records.is_empty() {
        console.warn(&format!("No records found in {}", results.display()));
    }
    console.info(&format!("Loaded {} records from {}", records.len(), results.display()));

    let context = PipelineContext::new(config);
    let client = Arc::new(context.client()?);
    let mut report = EvaluationReport::new(results.display().to_string(), &records);

    if pass.embedding() {
        let spinner = progress::spinner("embedding similarity");
        let similarity = EmbeddingEvaluator::new(client.clone(), &context)
            .evaluate(&records)
            .await;
        spinner.finish_and_clear();
        console.success(&format!(
            "Mean cosine similarity: {:.4} ({} record(s) with fallback embeddings)",
            similarity.mean_similarity, similarity.fallback_records
        ));
        report = report.with_similarity(similarity);
    }

    if pass.judge() {
        let spinner = progress::spinner("LLM judge");
        let judge = JudgeEvaluator::new(client, &context).evaluate(&records).await;
        spinner.finish_and_clear();
        console.success(&format!(
            "Mean judge composite: {:.2} ({} neutral fallback(s))",
            judge.mean_composite, judge.fallbacks
        ));
        report = report.with_judge(judge);
    }

    let rendered = generate_report(&report, format)?;
    match report_path {
        Some(path) => {
            tokio::fs::write(path, rendered).await.map_err(|e| {
                Redsm5Error::io_with_path(format!("Failed to write report: {}", e), path)
            })?;
            console.success(&format!("Report written to {}", path.display()));
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
