//! Adapters writing error documents as JSON HTTP responses

use http::header::{CONTENT_TYPE, HeaderValue};

use crate::{ErrorCategory, ErrorResponse, InnerError, Result};

impl ErrorResponse {
    /// Build a raw `application/json` response with the document's status
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be encoded; no partial body is
    /// ever produced.
    pub fn to_http(&self) -> Result<http::Response<String>> {
        let body = self.to_json()?;

        Ok(http::Response::builder()
            .status(self.status())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)?)
    }
}

/// Build the raw response for `category` and `errors` in one call
///
/// # Panics
///
/// Panics if the response cannot be generated rather than sending a
/// malformed body.
#[track_caller]
pub fn error_json(category: ErrorCategory, errors: impl IntoIterator<Item = InnerError>) -> http::Response<String> {
    match ErrorResponse::new(category, errors).to_http() {
        Ok(response) => response,
        Err(e) => panic!("failed to generate an error response: {e}"),
    }
}

#[cfg(feature = "axum")]
mod axum_impl {
    use axum::{
        body::Body,
        response::{IntoResponse, Response},
    };

    use crate::ErrorResponse;
    use crate::format::Formatter;

    impl IntoResponse for ErrorResponse {
        fn into_response(self) -> Response {
            tracing::debug!(
                status = self.code(),
                trace = %Formatter::new().detailed(true).trace(&self),
                "responding with error document"
            );

            match self.to_http() {
                Ok(response) => response.map(Body::from),
                Err(e) => panic!("failed to generate an error response: {e}"),
            }
        }
    }
}
