//! Configuration management commands

use crate::console::CliConsole;
use crate::router::load_config;
use redsm5_core::config::PipelineConfig;
use redsm5_core::error::{Redsm5Error, Redsm5Result};
use std::path::Path;

/// Show the effective configuration
pub async fn show(config_file: &str) -> Redsm5Result<()> {
    let console = CliConsole::new(true);

    console.print_header("Configuration");

    if !Path::new(config_file).exists() {
        console.warn(&format!("Configuration file not found: {config_file}"));
        console.info("Using defaults plus environment overrides");
    }

    let config = load_config(config_file)?;
    print_config(&console, &config);
    Ok(())
}

/// Validate configuration
pub async fn validate(config_file: &str) -> Redsm5Result<()> {
    let console = CliConsole::new(true);

    console.print_header("Configuration Validation");
    console.info(&format!("Validating configuration file: {config_file}"));

    match load_config(config_file) {
        Ok(config) => {
            console.success("Configuration is valid");
            console.info(&format!("Endpoint: {}", config.provider.base_url()));
            console.info(&format!(
                "Max concurrent requests: {}",
                config.concurrency.max_concurrent_requests
            ));
            Ok(())
        }
        Err(e) => {
            console.error(&format!("Configuration validation failed: {e}"));
            Err(e)
        }
    }
}

/// Initialize a new configuration file
pub async fn init(config_file: &str, force: bool) -> Redsm5Result<()> {
    let console = CliConsole::new(true);

    console.print_header("Configuration Initialization");

    let path = Path::new(config_file);
    if path.exists() && !force {
        console.error(&format!("Configuration file already exists: {config_file}"));
        console.info("Use --force to overwrite");
        return Err(Redsm5Error::config("Configuration file already exists"));
    }

    PipelineConfig::default().save(path)?;

    console.success(&format!("Created configuration file: {config_file}"));
    console.info("Edit the file to point at your inference server and models");
    Ok(())
}

/// Print configuration details
fn print_config(console: &CliConsole, config: &PipelineConfig) {
    console.print_field("Endpoint", config.provider.base_url());
    console.print_field(
        "API key",
        if config.provider.api_key.is_some() { "set" } else { "placeholder" },
    );
    console.print_field(
        "Timeouts (connect/request)",
        format!(
            "{}s / {}s",
            config.provider.connect_timeout_secs, config.provider.request_timeout_secs
        ),
    );
    console.print_field("Transport retries", config.provider.max_retries);
    console.print_field("Generation model", &config.models.generation);
    console.print_field("Judge model", &config.models.judge);
    console.print_field("Embedding model", &config.models.embedding);
    console.print_field(
        "Max concurrent requests",
        config.concurrency.max_concurrent_requests,
    );
    console.print_field("Dispatch workers", config.concurrency.dispatch_workers);
    console.print_field(
        "Evaluation workers",
        config.concurrency.evaluation_workers(),
    );
    console.print_field("Generation attempts", config.generation.max_attempts);
    console.print_field("Few-shot examples", config.generation.few_shot_count);
    console.print_field(
        "Judge weights (acc/cov/cla)",
        format!(
            "{:.2} / {:.2} / {:.2}",
            config.judge.weights.accuracy,
            config.judge.weights.coverage,
            config.judge.weights.clarity
        ),
    );
    console.print_field("Embedding dimension", config.embedding.dimension);
    console.print_field(
        "Split (test fraction / seed)",
        format!("{} / {}", config.dataset.test_fraction, config.dataset.seed),
    );
    console.print_field(
        "Logging",
        format!("{} ({})", config.logging.level, config.logging.format),
    );
}
