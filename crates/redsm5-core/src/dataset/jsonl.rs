//! JSON-lines persistence

use crate::error::{Redsm5Error, Redsm5Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncSeekExt, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

/// Append-only JSON-lines file
///
/// Each call to [`append`](Self::append) opens the file, writes one complete
/// line and flushes it, so a crash leaves every previously appended record
/// intact.
#[derive(Debug, Clone)]
pub struct JsonlWriter {
    path: PathBuf,
}

impl JsonlWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a single line
    pub async fn append<T: Serialize>(&self, record: &T) -> Redsm5Result<()> {
        let json = serde_json::to_string(record)
            .map_err(|e| Redsm5Error::json(format!("Failed to serialize record: {}", e)))?;

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                Redsm5Error::io_with_path(format!("Failed to open output file: {}", e), &self.path)
            })?;

        let mut line = String::with_capacity(json.len() + 2);
        if !ends_with_newline(&mut file).await.map_err(|e| {
            Redsm5Error::io_with_path(format!("Failed to inspect output file: {}", e), &self.path)
        })? {
            warn!(
                path = %self.path.display(),
                "output file ends with a partial line; starting a new one"
            );
            line.push('\n');
        }
        line.push_str(&json);
        line.push('\n');

        file.write_all(line.as_bytes()).await.map_err(|e| {
            Redsm5Error::io_with_path(format!("Failed to write record: {}", e), &self.path)
        })?;
        file.flush().await.map_err(|e| {
            Redsm5Error::io_with_path(format!("Failed to flush record: {}", e), &self.path)
        })?;

        Ok(())
    }
}

/// Whether `file` is empty or its last byte is a newline
async fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    if file.metadata().await?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1)).await?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last).await?;
    Ok(last[0] == b'\n')
}

/// Write `records` to `path`, replacing any existing content
pub async fn write_jsonl<T: Serialize>(path: &Path, records: &[T]) -> Redsm5Result<()> {
    let mut buffer = String::new();
    for record in records {
        buffer.push_str(&serde_json::to_string(record)?);
        buffer.push('\n');
    }

    let mut file = File::create(path).await.map_err(|e| {
        Redsm5Error::io_with_path(format!("Failed to create file: {}", e), path)
    })?;
    file.write_all(buffer.as_bytes())
        .await
        .map_err(|e| Redsm5Error::io_with_path(format!("Failed to write file: {}", e), path))?;
    file.flush()
        .await
        .map_err(|e| Redsm5Error::io_with_path(format!("Failed to flush file: {}", e), path))?;

    debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Read every record of a JSON-lines file
///
/// Blank lines are ignored. Lines that do not parse, such as a trailing line
/// cut short by a crash, are skipped with a warning.
pub async fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Redsm5Result<Vec<T>> {
    let file = File::open(path)
        .await
        .map_err(|e| Redsm5Error::io_with_path(format!("Failed to open file: {}", e), path))?;

    let mut lines = BufReader::new(file).lines();
    let mut records = Vec::new();
    let mut line_no = 0usize;

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| Redsm5Error::io_with_path(format!("Failed to read line: {}", e), path))?
    {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<T>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                let preview: String = line.chars().take(50).collect();
                warn!(line = line_no, "Skipping unparseable record: {} - line: {}", e, preview);
            }
        }
    }

    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Example;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_append_accumulates_lines() {
        let dir = TempDir::new().unwrap();
        let writer = JsonlWriter::new(dir.path().join("out.jsonl"));

        writer.append(&Example::new("a", "x")).await.unwrap();
        writer.append(&Example::new("b", "y")).await.unwrap();

        let content = tokio::fs::read_to_string(writer.path()).await.unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.starts_with(r#"{"text":"a","explanation":"x"}"#));
    }

    #[tokio::test]
    async fn test_append_after_partial_line_starts_new_line() {
        let dir = TempDir::new().unwrap();
        let writer = JsonlWriter::new(dir.path().join("results.jsonl"));
        writer.append(&Example::new("a", "x")).await.unwrap();

        let mut file = OpenOptions::new().append(true).open(writer.path()).await.unwrap();
        file.write_all(b"{\"text\":\"crash").await.unwrap();
        file.flush().await.unwrap();
        drop(file);

        JsonlWriter::new(writer.path()).append(&Example::new("b", "y")).await.unwrap();
        writer.append(&Example::new("c", "z")).await.unwrap();

        let records: Vec<Example> = read_jsonl(writer.path()).await.unwrap();
        assert_eq!(
            records,
            vec![Example::new("a", "x"), Example::new("b", "y"), Example::new("c", "z")]
        );
        let content = tokio::fs::read_to_string(writer.path()).await.unwrap();
        assert_eq!(content.lines().count(), 4);
    }

    #[tokio::test]
    async fn test_read_skips_blank_and_truncated_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.jsonl");
        tokio::fs::write(
            &path,
            "{\"text\":\"a\",\"explanation\":\"x\"}\n\n{\"text\":\"b\",\"explanation\":\"y\"}\n{\"text\":\"c\",\"expl",
        )
        .await
        .unwrap();

        let records: Vec<Example> = read_jsonl(&path).await.unwrap();
        assert_eq!(records, vec![Example::new("a", "x"), Example::new("b", "y")]);
    }

    #[tokio::test]
    async fn test_write_replaces_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.jsonl");
        write_jsonl(&path, &[Example::new("old", "old")]).await.unwrap();
        write_jsonl(&path, &[Example::new("new", "new")]).await.unwrap();

        let records: Vec<Example> = read_jsonl(&path).await.unwrap();
        assert_eq!(records, vec![Example::new("new", "new")]);
    }

    #[tokio::test]
    async fn test_read_missing_file_fails() {
        let result: Redsm5Result<Vec<Example>> =
            read_jsonl(Path::new("/nonexistent/x.jsonl")).await;
        assert!(result.is_err());
    }
}
