//! Logging setup for the error catalog service
//!
//! Installs a `tracing-subscriber` registry with an env filter and either a
//! human-readable or a JSON formatting layer.

use httperr_config::TelemetryConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the filter, falling back to `default_filter` when the configured
/// directive does not parse
///
/// `RUST_LOG` takes precedence over the configuration when set.
pub fn build_filter(config: &TelemetryConfig, default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|e| {
            eprintln!("invalid log filter `{}`: {e}; using `{default_filter}`", config.log_filter);
            EnvFilter::new(default_filter)
        })
}

/// Initialize the global subscriber from configuration
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: &TelemetryConfig) -> anyhow::Result<()> {
    let filter = build_filter(config, "info");
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    result.map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    tracing::debug!(filter = %config.log_filter, json = config.json, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_filter_falls_back() {
        let config = TelemetryConfig {
            log_filter: "app=verbose".to_owned(),
            json: false,
        };

        temp_env::with_var_unset("RUST_LOG", || {
            let filter = build_filter(&config, "warn");
            assert_eq!(filter.to_string(), "warn");
        });
    }

    #[test]
    fn second_init_fails() {
        let config = TelemetryConfig::default();

        let _ = init(&config);
        let err = init(&config).unwrap_err();
        assert!(err.to_string().contains("failed to initialize logging"));
    }
}
