//! ReDSM5 command-line interface
//!
//! Runs the explanation pipeline over the ReDSM5 corpus against a locally
//! hosted, OpenAI-compatible inference server.
//!
//! # Installation
//!
//! ```bash
//! cargo install --path crates/redsm5-cli
//! ```
//!
//! # Workflow
//!
//! ```bash
//! redsm5 config init                                   # write redsm5_config.json
//! redsm5 split --dataset redsm5.csv --test-out test.jsonl
//! redsm5 generate --dataset redsm5.csv --output results.jsonl
//! redsm5 evaluate all --results results.jsonl --format markdown
//! redsm5 stats --posts redsm5_posts.csv --annotations redsm5_annotations.csv
//! ```
//!
//! Logging follows the `logging` section of the configuration; `RUST_LOG`
//! overrides the level and `--verbose` switches to debug output.

mod args;
mod commands;
mod console;
mod logging;
mod progress;
mod router;

use clap::Parser;
use std::process::ExitCode;

pub use args::{Cli, Commands, ConfigAction};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match router::route(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            console::CliConsole::new(false).error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
