//! Environment variable-based configuration overrides

use super::logging_config::LogFormat;
use super::model::PipelineConfig;
use crate::error::{Redsm5Error, Redsm5Result};

/// Apply `REDSM5_*` environment variables on top of `config`
///
/// Recognised variables:
/// - `REDSM5_BASE_URL`, `REDSM5_API_KEY`
/// - `REDSM5_GENERATION_MODEL`, `REDSM5_JUDGE_MODEL`, `REDSM5_EMBEDDING_MODEL`
/// - `REDSM5_MAX_CONCURRENT`
/// - `REDSM5_LOG_LEVEL`, `REDSM5_LOG_FORMAT`
pub fn apply_env_overrides(config: &mut PipelineConfig) -> Redsm5Result<()> {
    apply_overrides(config, |key| std::env::var(key).ok())
}

pub(super) fn apply_overrides<F>(config: &mut PipelineConfig, lookup: F) -> Redsm5Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("REDSM5_BASE_URL") {
        config.provider.base_url = url;
    }
    if let Some(key) = lookup("REDSM5_API_KEY") {
        config.provider.api_key = Some(key);
    }

    if let Some(model) = lookup("REDSM5_GENERATION_MODEL") {
        config.models.generation = model;
    }
    if let Some(model) = lookup("REDSM5_JUDGE_MODEL") {
        config.models.judge = model;
    }
    if let Some(model) = lookup("REDSM5_EMBEDDING_MODEL") {
        config.models.embedding = model;
    }

    if let Some(value) = lookup("REDSM5_MAX_CONCURRENT") {
        config.concurrency.max_concurrent_requests = value
            .trim()
            .parse()
            .map_err(|_| {
                Redsm5Error::config(format!("Invalid REDSM5_MAX_CONCURRENT value: {}", value))
            })?;
    }

    if let Some(level) = lookup("REDSM5_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(format) = lookup("REDSM5_LOG_FORMAT") {
        config.logging.format = format
            .parse::<LogFormat>()
            .map_err(Redsm5Error::config)?;
    }

    Ok(())
}
