//! Drives generation over a batch of examples

use super::generator::ExplanationGenerator;
use super::sink::ResultSink;
use super::types::ResultRecord;
use crate::concurrency::WorkerPool;
use crate::dataset::Example;
use crate::error::{Redsm5Error, Redsm5Result};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::{error, info, instrument};

/// Totals for one dispatch run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Records persisted
    pub processed: usize,
    /// Records holding the sentinel
    pub fallbacks: usize,
    pub elapsed: Duration,
}

/// Generates and persists one record per example
///
/// With a single worker (the default) examples are processed strictly in
/// order and each call completes before the next one starts. Every record is
/// written before the worker takes its next example. A failure to write the
/// output stops the run and is returned to the caller.
pub struct Dispatcher<'a> {
    generator: &'a ExplanationGenerator,
    sink: &'a ResultSink,
    pool: WorkerPool,
}

impl<'a> Dispatcher<'a> {
    pub fn new(generator: &'a ExplanationGenerator, sink: &'a ResultSink, workers: usize) -> Self {
        Self {
            generator,
            sink,
            pool: WorkerPool::new(workers),
        }
    }

    pub async fn run(&self, examples: Vec<Example>) -> Redsm5Result<DispatchSummary> {
        self.run_with_progress(examples, |_, _| {}).await
    }

    /// Run the batch, calling `on_record(persisted_so_far, record)` after each write
    #[instrument(skip_all, fields(examples = examples.len(), workers = self.pool.workers()))]
    pub async fn run_with_progress<F>(
        &self,
        examples: Vec<Example>,
        on_record: F,
    ) -> Redsm5Result<DispatchSummary>
    where
        F: Fn(usize, &ResultRecord),
    {
        let start = Instant::now();
        let persisted = AtomicUsize::new(0);
        let fallbacks = AtomicUsize::new(0);
        let aborted = AtomicBool::new(false);

        let results = self
            .pool
            .run(examples, |index, example| {
                let (persisted, fallbacks, aborted, on_record) =
                    (&persisted, &fallbacks, &aborted, &on_record);
                async move {
                    if aborted.load(Ordering::SeqCst) {
                        return Ok(());
                    }

                    let outcome = self.generator.generate(&example.text).await;
                    if outcome.is_fallback() {
                        fallbacks.fetch_add(1, Ordering::SeqCst);
                    }
                    let record = ResultRecord::new(example, outcome.into_value());

                    if let Err(e) = self.sink.record(&record).await {
                        error!(index, error = %e, "failed to persist result, stopping");
                        aborted.store(true, Ordering::SeqCst);
                        return Err(e);
                    }

                    let done = persisted.fetch_add(1, Ordering::SeqCst) + 1;
                    on_record(done, &record);
                    Ok::<(), Redsm5Error>(())
                }
            })
            .await;

        if let Some(err) = results.into_iter().find_map(Result::err) {
            return Err(err);
        }

        let summary = DispatchSummary {
            processed: persisted.load(Ordering::SeqCst),
            fallbacks: fallbacks.load(Ordering::SeqCst),
            elapsed: start.elapsed(),
        };
        info!(
            processed = summary.processed,
            fallbacks = summary.fallbacks,
            elapsed_secs = summary.elapsed.as_secs_f64(),
            "generation finished"
        );
        Ok(summary)
    }
}
