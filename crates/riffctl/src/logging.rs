//! Logging setup for riffctl
//!
//! Diagnostics go to stderr so command output on stdout stays clean.
//! `$RIFF_LOG` takes precedence over the configured level.

use tracing_subscriber::EnvFilter;

/// Environment variable with a tracing filter directive
pub const LOG_ENV: &str = "RIFF_LOG";

/// Install the global subscriber. Safe to call more than once.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
