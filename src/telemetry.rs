//! Tracing initialization for the CLI.
//!
//! Verbosity maps `-v` counts to a default level; the `CM_LOG` env var
//! overrides it with a full filter directive. Output goes to stderr so
//! query results on stdout stay machine-readable.

use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

pub fn init(verbosity: u8, format: LogFormat) {
    let filter = || {
        EnvFilter::builder()
            .with_default_directive(level_from_verbosity(verbosity).into())
            .with_env_var("CM_LOG")
            .from_env_lossy()
    };
    match format {
        LogFormat::Compact => tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .compact()
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .pretty()
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .json()
            .init(),
    }
}

fn level_from_verbosity(verbosity: u8) -> tracing::metadata::LevelFilter {
    match verbosity {
        0 => tracing::metadata::LevelFilter::ERROR,
        1 => tracing::metadata::LevelFilter::INFO,
        _ => tracing::metadata::LevelFilter::DEBUG,
    }
}
