use std::sync::Arc;

use httperr_config::Config;
use httperr_core::{ErrorResponse, Formatter, HttpError};

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    formatter: Formatter,
    domain: Arc<str>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            formatter: Formatter::new()
                .detailed(config.trace.detail)
                .with_locations(config.trace.locations),
            domain: Arc::from(config.server.errors.domain.as_str()),
        }
    }

    pub const fn formatter(&self) -> Formatter {
        self.formatter
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Turn a handler failure into its error document, logging the trace
    pub fn reject(&self, error: &impl HttpError) -> ErrorResponse {
        let response = error.to_response(&self.domain);
        let status = response.status();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), trace = %self.formatter.trace(&response), "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), trace = %self.formatter.trace(&response), "request rejected");
        }

        response
    }
}
