//! Append-only result persistence

use super::types::ResultRecord;
use crate::dataset::JsonlWriter;
use crate::error::Redsm5Result;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// Persists each result record the moment it is produced
///
/// Existing content is never truncated: rerunning a generation appends
/// another copy of every record. Concurrent writers are serialized so each
/// record lands on its own complete line.
#[derive(Debug)]
pub struct ResultSink {
    writer: Mutex<JsonlWriter>,
    path: PathBuf,
}

impl ResultSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            writer: Mutex::new(JsonlWriter::new(path.clone())),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn record(&self, record: &ResultRecord) -> Redsm5Result<()> {
        let writer = self.writer.lock().await;
        writer.append(record).await?;
        debug!(fallback = record.is_fallback(), "persisted result record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Example, read_jsonl};
    use crate::generation::GeneratedExplanation;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_concurrent_records_stay_line_delimited() {
        let dir = TempDir::new().unwrap();
        let sink = Arc::new(ResultSink::new(dir.path().join("results.jsonl")));

        let writes = (0..20).map(|i| {
            let sink = sink.clone();
            async move {
                let record = ResultRecord::new(
                    Example::new(format!("post {}", i), "ref"),
                    GeneratedExplanation::new("pred", "cot"),
                );
                sink.record(&record).await.unwrap();
            }
        });
        futures::future::join_all(writes).await;

        let records: Vec<ResultRecord> = read_jsonl(sink.path()).await.unwrap();
        assert_eq!(records.len(), 20);
    }

    #[tokio::test]
    async fn test_rerun_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.jsonl");
        let record = ResultRecord::new(Example::new("a", "b"), GeneratedExplanation::sentinel());

        ResultSink::new(&path).record(&record).await.unwrap();
        ResultSink::new(&path).record(&record).await.unwrap();

        let records: Vec<ResultRecord> = read_jsonl(&path).await.unwrap();
        assert_eq!(records, vec![record.clone(), record]);
    }
}
