use thiserror::Error;

use crate::{ErrorCategory, ErrorResponse, InnerError};

pub type Result<T> = std::result::Result<T, Error>;

/// Failures while turning an error document into a response
#[derive(Debug, Error)]
pub enum Error {
    /// The document could not be encoded as JSON
    #[error("failed to encode error response: {0}")]
    Encode(#[from] serde_json::Error),

    /// The HTTP response could not be assembled
    #[error("failed to build error response: {0}")]
    Http(#[from] http::Error),
}

/// Trait for domain errors that can be reported as error documents
///
/// Implemented by each service's error type. The server layer converts
/// these into responses, keeping domain errors decoupled from axum.
pub trait HttpError: std::error::Error {
    /// Category selecting the status code and top-level message
    fn category(&self) -> ErrorCategory;

    /// Field-level details reported under `domain`, in reporting order
    fn inner_errors(&self, _domain: &str) -> Vec<InnerError> {
        Vec::new()
    }

    /// Assemble the full error response
    fn to_response(&self, domain: &str) -> ErrorResponse {
        ErrorResponse::new(self.category(), self.inner_errors(domain))
    }
}
