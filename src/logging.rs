use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Installs the global `fmt` subscriber.
///
/// `RUST_LOG` wins over the configured level. Calling this twice is harmless:
/// the second install attempt is ignored.
pub fn init_tracing(log_config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&log_config.level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
