//! Structured logging configuration.
//!
//! Library events arrive through the `log` facade and are bridged into the
//! tracing subscriber. Output goes to stderr so command output on stdout
//! stays clean.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "warn,village_gov=info,vg_client=info,hyper=warn,reqwest=warn";

/// Initialize logging, configurable via the `RUST_LOG` env var
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// Log completion of a CLI command
///
/// # Arguments
///
/// * `command` - Command name
/// * `duration_ms` - Wall time in milliseconds
/// * `success` - Whether the command succeeded
pub fn log_command(command: &str, duration_ms: u64, success: bool) {
    if success {
        tracing::debug!(command = command, duration_ms = duration_ms, "Command completed");
    } else {
        tracing::warn!(command = command, duration_ms = duration_ms, "Command failed");
    }

    if duration_ms > 5000 {
        tracing::warn!(
            command = command,
            duration_ms = duration_ms,
            "PERFORMANCE: Slow command"
        );
    }
}
