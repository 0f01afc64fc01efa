//! CLI command implementations

pub mod config;
pub mod evaluate;
pub mod generate;
pub mod split;
pub mod stats;

use redsm5_core::config::PipelineConfig;
use redsm5_core::dataset::{DatasetSplit, Example, load_labeled_posts};
use redsm5_core::error::Redsm5Result;
use std::path::Path;

/// Load the annotated corpus and split it as configured
pub(crate) fn load_split(
    config: &PipelineConfig,
    dataset: &Path,
) -> Redsm5Result<DatasetSplit<Example>> {
    let posts = load_labeled_posts(dataset)?;
    Ok(DatasetSplit::new(posts, &config.dataset).into_examples())
}
