use std::sync::Arc;

use httperr_core::{Cause, ErrorCategory, HttpError, InnerError};
use thiserror::Error;

/// Failures reported by the catalog service
#[derive(Debug, Error)]
pub enum ServerError {
    /// Path named a category that does not exist
    #[error("unknown error category `{0}`")]
    UnknownCategory(String),

    /// Render request named a category that does not exist
    #[error("`{0}` is not a valid error category")]
    InvalidCategory(String),

    /// Request body was missing, not JSON, or had the wrong shape
    #[error("request body could not be parsed")]
    InvalidBody(#[source] Cause),

    /// Render request attached more causes to one inner error than allowed
    #[error("inner error {index} has {count} causes, at most {max} are allowed", max = crate::render::MAX_CAUSES)]
    TooManyCauses { index: usize, count: usize },

    /// No route matches the request path
    #[error("no route for {0}")]
    NoRoute(String),

    /// Route exists but not for this method
    #[error("method {method} is not allowed for {path}")]
    MethodNotAllowed { method: String, path: String },
}

impl ServerError {
    /// Wrap a body extraction failure
    pub fn invalid_body<E>(rejection: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::InvalidBody(Arc::new(rejection))
    }
}

impl HttpError for ServerError {
    fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownCategory(_) | Self::NoRoute(_) => ErrorCategory::NotFound,
            Self::InvalidCategory(_) | Self::TooManyCauses { .. } => ErrorCategory::InvalidArgument,
            Self::InvalidBody(_) => ErrorCategory::ParseError,
            Self::MethodNotAllowed { .. } => ErrorCategory::MethodNotAllowed,
        }
    }

    fn inner_errors(&self, domain: &str) -> Vec<InnerError> {
        let message = self.to_string();

        let inner = match self {
            Self::UnknownCategory(name) => InnerError::new(domain, "notFound", name.as_str(), "path", message),
            Self::NoRoute(path) => InnerError::new(domain, "notFound", path.as_str(), "path", message),
            Self::InvalidCategory(_) => {
                InnerError::new(domain, "invalidArgument", "category", "requestBody", message)
            }
            Self::TooManyCauses { index, .. } => InnerError::new(
                domain,
                "invalidArgument",
                format!("errors[{index}].causes"),
                "requestBody",
                message,
            ),
            Self::InvalidBody(cause) => InnerError::new(domain, "parseError", "body", "requestBody", message)
                .with_shared_cause(Arc::clone(cause)),
            Self::MethodNotAllowed { method, .. } => {
                InnerError::new(domain, "methodNotAllowed", method.as_str(), "method", message)
            }
        };

        vec![inner]
    }
}
