//! Explanation generation command

use super::load_split;
use crate::console::CliConsole;
use crate::progress;
use redsm5_core::config::PipelineConfig;
use redsm5_core::error::{Redsm5Error, Redsm5Result};
use redsm5_core::generation::{Dispatcher, ExplanationGenerator, ResultSink};
use redsm5_core::PipelineContext;
use std::path::PathBuf;
use std::sync::Arc;

pub struct GenerateOptions {
    pub dataset: PathBuf,
    pub output: PathBuf,
    pub limit: Option<usize>,
    pub workers: Option<usize>,
}

/// Generate explanations for the test split and append them to the output file
pub async fn run(
    config: PipelineConfig,
    options: GenerateOptions,
    verbose: bool,
) -> Redsm5Result<()> {
    let console = CliConsole::new(verbose);

    let workers = options
        .workers
        .unwrap_or(config.concurrency.dispatch_workers);
    if workers == 0 {
        return Err(Redsm5Error::invalid_field("workers", "must be at least 1"));
    }

    let split = load_split(&config, &options.dataset)?;
    let context = PipelineContext::new(config).with_few_shot(&split.train);

    let mut test = split.test;
    if let Some(limit) = options.limit {
        test.truncate(limit);
    }
    if test.is_empty() {
        console.warn("No test examples to process");
        return Ok(());
    }

    console.info(&format!(
        "Model {} | {} examples | {} few-shot | {} worker(s) | {} concurrent requests",
        context.config().models.generation,
        test.len(),
        context.few_shot().len(),
        workers,
        context.permits().capacity()
    ));
    if options.output.exists() {
        console.warn(&format!(
            "{} already exists; new records will be appended",
            options.output.display()
        ));
    }

    let generator = ExplanationGenerator::new(Arc::new(context.client()?), &context);
    let sink = ResultSink::new(&options.output);

    let bar = progress::batch_bar(test.len(), "generating");
    let result = Dispatcher::new(&generator, &sink, workers)
        .run_with_progress(test, |_, record| {
            if record.is_fallback() {
                bar.set_message("generating (last record fell back)");
            } else {
                bar.set_message("generating");
            }
            bar.inc(1);
        })
        .await;
    bar.finish_and_clear();
    let summary = result?;

    console.success(&format!(
        "Wrote {} records to {} in {:.1}s",
        summary.processed,
        sink.path().display(),
        summary.elapsed.as_secs_f64()
    ));
    if summary.fallbacks > 0 {
        console.warn(&format!(
            "{} of {} records hold the error sentinel",
            summary.fallbacks, summary.processed
        ));
    }

    Ok(())
}
