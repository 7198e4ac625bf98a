// Logging/tracing setup

use partspec_config::RuntimeConfig;

/// Initialize tracing from RuntimeConfig
pub fn init_tracing(config: &RuntimeConfig) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Parse log level from config
    let env_filter =
        EnvFilter::try_new(&config.log.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr));

    // Try to set the global subscriber; ignore error if already set (idempotent)
    let _ = tracing::subscriber::set_global_default(registry);
}
