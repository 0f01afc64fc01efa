//! CLI argument definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use redsm5_core::config::DEFAULT_CONFIG_FILE;
use redsm5_eval::ReportFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "redsm5")]
#[command(about = "Generate and evaluate DSM-5 symptom explanations for the ReDSM5 corpus")]
#[command(
    long_about = r#"Generate and evaluate DSM-5 symptom explanations for the ReDSM5 corpus

USAGE:
  redsm5 split --dataset <csv> --test-out <jsonl>     # Deterministic train/test split
  redsm5 generate --dataset <csv> --output <jsonl>    # Few-shot explanation generation
  redsm5 evaluate all --results <jsonl>               # Embedding + judge evaluation
  redsm5 stats --posts <csv> --annotations <csv>      # Corpus statistics

UTILITY COMMANDS:
  redsm5 config init                                  # Create config file
  redsm5 config show                                  # Show effective config"#
)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: String,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split the annotated dataset into train and test JSON-lines files
    Split {
        /// Annotated corpus CSV (text, labels, explanation)
        #[arg(long)]
        dataset: PathBuf,

        /// Destination of the test split
        #[arg(long)]
        test_out: PathBuf,

        /// Destination of the train split
        #[arg(long)]
        train_out: Option<PathBuf>,
    },

    /// Generate an explanation for every test post
    Generate {
        /// Annotated corpus CSV (text, labels, explanation)
        #[arg(long)]
        dataset: PathBuf,

        /// Results file; records are appended
        #[arg(long)]
        output: PathBuf,

        /// Process only the first N test posts
        #[arg(long)]
        limit: Option<usize>,

        /// Dispatch workers (overrides the configuration)
        #[arg(long)]
        workers: Option<usize>,
    },

    /// Evaluate generated explanations
    Evaluate {
        /// Which evaluation to run
        #[arg(value_enum)]
        pass: EvaluationPass,

        /// Results file written by `generate`
        #[arg(long)]
        results: PathBuf,

        /// Report format
        #[arg(long, value_enum, default_value = "json")]
        format: FormatArg,

        /// Write the report here instead of standard output
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Print descriptive statistics of the raw corpus
    Stats {
        /// Posts CSV (post_id, text)
        #[arg(long)]
        posts: PathBuf,

        /// Annotations CSV (post_id, DSM5_symptom, status)
        #[arg(long)]
        annotations: PathBuf,

        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigAction {
    /// Display the effective configuration (file plus environment)
    Show,

    /// Validate the configuration
    Validate,

    /// Create a new configuration file with defaults
    Init {
        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EvaluationPass {
    Embedding,
    Judge,
    All,
}

impl EvaluationPass {
    pub fn embedding(self) -> bool {
        matches!(self, EvaluationPass::Embedding | EvaluationPass::All)
    }

    pub fn judge(self) -> bool {
        matches!(self, EvaluationPass::Judge | EvaluationPass::All)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Markdown,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => ReportFormat::Json,
            FormatArg::Markdown => ReportFormat::Markdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_evaluate() {
        let cli = Cli::parse_from([
            "redsm5",
            "evaluate",
            "judge",
            "--results",
            "results.jsonl",
            "--format",
            "markdown",
            "--verbose",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Evaluate { pass, format, report, .. } => {
                assert!(pass.judge() && !pass.embedding());
                assert_eq!(format, FormatArg::Markdown);
                assert!(report.is_none());
            }
            _ => panic!("expected evaluate"),
        }
    }

    #[test]
    fn test_global_config_file_default() {
        let cli = Cli::parse_from(["redsm5", "config", "show"]);
        assert_eq!(cli.config_file, DEFAULT_CONFIG_FILE);
    }
}
