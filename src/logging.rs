use crate::config::DashboardConfig;
use crate::error::{GearGuardError, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Builds the event filter: `RUST_LOG` wins, otherwise the configured level.
pub fn env_filter(config: &DashboardConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|e| {
            GearGuardError::ConfigError(format!("invalid log level '{}': {}", config.log_level, e))
        }),
    }
}

/// Installs the global tracing subscriber.
///
/// Fails instead of panicking when a subscriber is already installed.
pub fn init_tracing(config: &DashboardConfig) -> Result<()> {
    let filter = env_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    installed.map_err(|e| GearGuardError::ConfigError(format!("logging already initialized: {}", e)))
}
