//! Logging setup
//!
//! Level comes from `-v` flags, then the configured `log_level`
//! (`CLOBFTS_LOG` overrides the config file), then `warn`. Logs go to the
//! configured file when one is set, otherwise to stderr.

use std::fs::OpenOptions;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use clobfts_core::Config;

/// Pick the effective log level
pub fn effective_level(config: &Config, verbose: u8) -> String {
    match verbose {
        0 => config
            .log_level
            .clone()
            .unwrap_or_else(|| "warn".to_string()),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::new(format!("clobfts_core={},clobfts_cli={}", level, level))
}

/// Install the global subscriber (ignores a second call)
pub fn init(config: &Config, verbose: u8) {
    let level = effective_level(config, verbose);

    if let Some(ref path) = config.log_file {
        let log_file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Warning: Could not open log file {:?}: {}", path, e);
                return;
            }
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter_for(&level))
            .with_target(false)
            .with_ansi(false)
            .with_writer(log_file)
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter_for(&level))
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }

    debug!("Logging initialized at level {}", level);
}
