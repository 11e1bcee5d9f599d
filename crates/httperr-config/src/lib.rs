#![allow(clippy::must_use_candidate)]

mod env;
mod loader;
pub mod server;
pub mod telemetry;
pub mod trace;

use serde::Deserialize;

pub use server::*;
pub use telemetry::TelemetryConfig;
pub use trace::TraceConfig;

/// Top-level service configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Listener and error reporting settings
    #[serde(default)]
    pub server: ServerConfig,
    /// How error chains are rendered in logs and render responses
    #[serde(default)]
    pub trace: TraceConfig,
    /// Logging setup
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
