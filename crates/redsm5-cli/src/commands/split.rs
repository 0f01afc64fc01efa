//! Dataset split command

use super::load_split;
use crate::console::CliConsole;
use redsm5_core::config::PipelineConfig;
use redsm5_core::dataset::write_jsonl;
use redsm5_core::error::Redsm5Result;
use std::path::Path;

/// Write the deterministic test split (and optionally the train split)
pub async fn run(
    config: &PipelineConfig,
    dataset: &Path,
    test_out: &Path,
    train_out: Option<&Path>,
    verbose: bool,
) -> Redsm5Result<()> {
    let console = CliConsole::new(verbose);
    console.info(&format!(
        "Splitting {} (test fraction {}, seed {})",
        dataset.display(),
        config.dataset.test_fraction,
        config.dataset.seed
    ));

    let split = load_split(config, dataset)?;

    write_jsonl(test_out, &split.test).await?;
    console.success(&format!(
        "Wrote {} test examples to {}",
        split.test.len(),
        test_out.display()
    ));

    if let Some(train_out) = train_out {
        write_jsonl(train_out, &split.train).await?;
        console.success(&format!(
            "Wrote {} train examples to {}",
            split.train.len(),
            train_out.display()
        ));
    }

    Ok(())
}
