//! Tracing subscriber initialisation.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::error::{AppError, AppResult};

/// Builds the env filter: `RUST_LOG` wins, the configured directive is the fallback.
fn build_filter(config: &LoggingConfig) -> AppResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.filter).map_err(|e| {
            AppError::Configuration(format!("invalid log filter '{}': {e}", config.filter))
        }),
    }
}

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns `AppError::Configuration` if the filter directive is invalid or a
/// global subscriber has already been installed.
pub fn init_tracing(config: &LoggingConfig) -> AppResult<()> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    result.map_err(|e| AppError::Configuration(format!("tracing already initialised: {e}")))
}
