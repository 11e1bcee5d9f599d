//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use httperr_config::{Config, ErrorsConfig, ServerConfig, TraceConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder listening on a loopback port
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    ..ServerConfig::default()
                },
                ..Config::default()
            },
        }
    }

    /// Report service errors under `domain`
    pub fn with_domain(mut self, domain: &str) -> Self {
        self.config.server.errors = ErrorsConfig {
            domain: domain.to_owned(),
        };
        self
    }

    /// Render traces with messages only
    pub fn plain_traces(mut self) -> Self {
        self.config.trace = TraceConfig {
            detail: false,
            locations: false,
        };
        self
    }

    /// Append construction call sites to trace frames
    pub fn with_locations(mut self) -> Self {
        self.config.trace.locations = true;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
