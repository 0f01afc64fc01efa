//! Command routing logic for CLI

use crate::args::{Cli, Commands, ConfigAction};
use crate::{commands, logging};
use redsm5_core::config::{ConfigLoader, LoggingConfig, PipelineConfig};
use redsm5_core::error::Redsm5Result;

/// Load the effective configuration: defaults, then the file, then the environment
pub fn load_config(config_file: &str) -> Redsm5Result<PipelineConfig> {
    ConfigLoader::new()
        .with_defaults()
        .with_file(config_file)
        .with_env()
        .load()
}

/// Load the configuration and install logging for a pipeline command
fn prepare(config_file: &str, verbose: bool) -> Redsm5Result<PipelineConfig> {
    let config = load_config(config_file)?;
    logging::init(&config.logging, verbose);
    tracing::debug!(config_file = %config_file, "configuration loaded");
    Ok(config)
}

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> Redsm5Result<()> {
    let Cli {
        config_file,
        verbose,
        command,
    } = cli;

    match command {
        Commands::Split {
            dataset,
            test_out,
            train_out,
        } => {
            let config = prepare(&config_file, verbose)?;
            commands::split::run(&config, &dataset, &test_out, train_out.as_deref(), verbose).await
        }
        Commands::Generate {
            dataset,
            output,
            limit,
            workers,
        } => {
            let config = prepare(&config_file, verbose)?;
            let options = commands::generate::GenerateOptions {
                dataset,
                output,
                limit,
                workers,
            };
            commands::generate::run(config, options, verbose).await
        }
        Commands::Evaluate {
            pass,
            results,
            format,
            report,
        } => {
            let config = prepare(&config_file, verbose)?;
            commands::evaluate::run(
                config,
                pass,
                &results,
                format.into(),
                report.as_deref(),
                verbose,
            )
            .await
        }
        Commands::Stats {
            posts,
            annotations,
            json,
        } => {
            logging::init(&LoggingConfig::default(), verbose);
            commands::stats::run(&posts, &annotations, json).await
        }
        // Config commands must work while the configuration itself is invalid.
        Commands::Config { action } => {
            logging::init(&LoggingConfig::default(), verbose);
            match action {
                ConfigAction::Show => commands::config::show(&config_file).await,
                ConfigAction::Validate => commands::config::validate(&config_file).await,
                ConfigAction::Init { force } => commands::config::init(&config_file, force).await,
            }
        }
    }
}
