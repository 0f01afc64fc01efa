//! Pipeline configuration
//!
//! Configuration is assembled by [`ConfigLoader`] from built-in defaults, an
//! optional JSON file and `REDSM5_*` environment variables, in that order,
//! and validated before use.

mod env_loader;
mod loader;
mod logging_config;
mod model;
pub mod timeouts;
mod validation;

pub use env_loader::apply_env_overrides;
pub use loader::{ConfigLoader, ConfigSource, DEFAULT_CONFIG_FILE, load_from_file};
pub use logging_config::{LogFormat, LoggingConfig};
pub use model::{
    ConcurrencyConfig, DatasetConfig, EmbeddingConfig, GenerationConfig, JudgeConfig, JudgeWeights,
    ModelSelection, PipelineConfig, ProviderConfig,
};
