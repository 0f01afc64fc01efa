//! Configuration loading and management

use super::env_loader::apply_env_overrides;
use super::model::PipelineConfig;
use crate::error::{Redsm5Error, Redsm5Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default configuration file name used across all CLI commands
pub const DEFAULT_CONFIG_FILE: &str = "redsm5_config.json";

/// Source of configuration data
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Built-in defaults
    Default,
    /// JSON file; a missing file is skipped
    File(PathBuf),
    /// `.env` file plus `REDSM5_*` environment variables
    Environment,
}

/// Configuration loader with support for multiple sources
///
/// Sources are applied in the order they were added. A file source replaces
/// the whole configuration (its missing fields take default values), the
/// environment source overrides individual fields.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a configuration source
    pub fn add_source(mut self, source: ConfigSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Add default configuration source
    pub fn with_defaults(self) -> Self {
        self.add_source(ConfigSource::Default)
    }

    /// Add a file source
    pub fn with_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_source(ConfigSource::File(path.as_ref().to_path_buf()))
    }

    /// Add environment variables source
    pub fn with_env(self) -> Self {
        self.add_source(ConfigSource::Environment)
    }

    /// Load configuration from all sources and validate it
    pub fn load(self) -> Redsm5Result<PipelineConfig> {
        let mut config = PipelineConfig::default();

        for source in &self.sources {
            match source {
                ConfigSource::Default => config = PipelineConfig::default(),
                ConfigSource::File(path) => {
                    if let Some(from_file) = load_from_file(path)? {
                        config = from_file;
                    }
                }
                ConfigSource::Environment => {
                    if dotenv::dotenv().is_ok() {
                        debug!("Loaded variables from .env");
                    }
                    apply_env_overrides(&mut config)?;
                }
            }
        }

        config.validate()?;
        Ok(config)
    }
}

/// Read a JSON configuration file; `Ok(None)` when the file does not exist
pub fn load_from_file(path: &Path) -> Redsm5Result<Option<PipelineConfig>> {
    if !path.exists() {
        debug!("Config file {} not found, using defaults", path.display());
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| {
        Redsm5Error::io_with_path(format!("Failed to read config file: {}", e), path)
    })?;

    let config: PipelineConfig = serde_json::from_str(&content).map_err(|e| {
        Redsm5Error::config_with_context(
            format!("Invalid config JSON: {}", e),
            format!("Parsing {}", path.display()),
        )
    })?;

    info!("Loaded configuration from {}", path.display());
    Ok(Some(config))
}

impl PipelineConfig {
    /// Write this configuration as pretty JSON
    pub fn save(&self, path: &Path) -> Redsm5Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| {
            Redsm5Error::io_with_path(format!("Failed to write config file: {}", e), path)
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigLoader::new()
            .with_defaults()
            .with_file(dir.path().join("absent.json"))
            .load()
            .unwrap();
        assert_eq!(config.concurrency.max_concurrent_requests, 5);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("redsm5_config.json");
        fs::write(
            &path,
            r#"{"models": {"generation": "llama3.2:3b"}, "concurrency": {"max_concurrent_requests": 2}}"#,
        )
        .unwrap();

        let config = ConfigLoader::new().with_defaults().with_file(&path).load().unwrap();
        assert_eq!(config.models.generation, "llama3.2:3b");
        assert_eq!(config.models.embedding, "nomic-embed-text");
        assert_eq!(config.concurrency.max_concurrent_requests, 2);
        assert_eq!(config.generation.max_attempts, 5);
    }

    #[test]
    fn test_invalid_file_values_fail_validation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"embedding": {"dimension": 0}}"#).unwrap();

        let err = ConfigLoader::new().with_file(&path).load().unwrap_err();
        assert!(matches!(err, Redsm5Error::Config { .. }));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        let mut config = PipelineConfig::default();
        config.models.judge = "gemma2:9b".to_string();
        config.save(&path).unwrap();

        let loaded = load_from_file(&path).unwrap().unwrap();
        assert_eq!(loaded.models.judge, "gemma2:9b");
    }
}
