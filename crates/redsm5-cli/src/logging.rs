//! Tracing subscriber setup

use redsm5_core::config::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over the configured level; `verbose` raises
/// the configured level to debug. Logs go to stderr so reports written to
/// stdout stay clean.
pub fn init(config: &LoggingConfig, verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = if verbose {
            LoggingConfig {
                level: "debug".to_string(),
                ..config.clone()
            }
            .filter_directive()
        } else {
            config.filter_directive()
        };
        EnvFilter::new(directive)
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if let Err(e) = result {
        eprintln!("Failed to initialise logging: {}", e);
    }
}
