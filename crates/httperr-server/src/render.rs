use axum::{Json, extract::State, extract::rejection::JsonRejection};
use httperr_core::{ErrorCategory, ErrorResponse, InnerError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ServerError;
use crate::state::AppState;

/// Body of `POST /v1/render`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderRequest {
    pub category: String,
    #[serde(default)]
    pub errors: Vec<RenderInner>,
}

/// Inner error description with an optional cause chain, outermost first
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RenderInner {
    pub domain: String,
    pub reason: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub location_type: String,
    pub message: String,
    #[serde(default)]
    pub causes: Vec<String>,
}

/// Rendered document plus its diagnostic trace
#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub status: u16,
    pub document: ErrorResponse,
    pub trace: Vec<String>,
}

/// Most causes a single inner error of a render request may carry
pub const MAX_CAUSES: usize = 64;

/// Cause supplied by a render request
#[derive(Debug, Error)]
#[error("{message}")]
struct ReportedCause {
    message: String,
    source: Option<Box<ReportedCause>>,
}

impl Drop for ReportedCause {
    fn drop(&mut self) {
        // Unlink iteratively so long chains do not recurse
        let mut next = self.source.take();
        while let Some(mut cause) = next {
            next = cause.source.take();
        }
    }
}

impl ReportedCause {
    /// Chain `messages` so the first wraps the second and so on
    fn chain(messages: Vec<String>) -> Option<Self> {
        messages.into_iter().rev().fold(None, |source, message| {
            Some(Self {
                message,
                source: source.map(Box::new),
            })
        })
    }
}

impl From<RenderInner> for InnerError {
    fn from(inner: RenderInner) -> Self {
        let error = Self::new(
            inner.domain,
            inner.reason,
            inner.location,
            inner.location_type,
            inner.message,
        );

        match ReportedCause::chain(inner.causes) {
            Some(cause) => error.with_cause(cause),
            None => error,
        }
    }
}

/// Handle `POST /v1/render`
pub async fn render_document(
    State(state): State<AppState>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<Json<RenderResponse>, ErrorResponse> {
    let Json(request) = payload.map_err(|rejection| state.reject(&ServerError::invalid_body(rejection)))?;

    let category = request
        .category
        .parse::<ErrorCategory>()
        .map_err(|_| state.reject(&ServerError::InvalidCategory(request.category.clone())))?;

    if let Some((index, inner)) = request
        .errors
        .iter()
        .enumerate()
        .find(|(_, inner)| inner.causes.len() > MAX_CAUSES)
    {
        return Err(state.reject(&ServerError::TooManyCauses {
            index,
            count: inner.causes.len(),
        }));
    }

    let document = ErrorResponse::new(category, request.errors.into_iter().map(InnerError::from));
    let trace = state.formatter().render(&document);

    tracing::debug!(%category, frames = trace.len(), "rendered error document");

    Ok(Json(RenderResponse {
        status: document.code(),
        document,
        trace,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn causes_chain_outermost_first() {
        let cause = ReportedCause::chain(vec!["outer".to_owned(), "inner".to_owned()]).unwrap();

        assert_eq!(cause.to_string(), "outer");
        let inner = cause.source.as_ref().unwrap();
        assert_eq!(inner.to_string(), "inner");
        assert!(inner.source.is_none());
    }

    #[test]
    fn long_chains_drop_without_recursing() {
        let cause = ReportedCause::chain(vec!["a".to_owned(); 500_000]).unwrap();
        drop(cause);
    }

    #[test]
    fn no_causes_no_chain() {
        assert!(ReportedCause::chain(Vec::new()).is_none());
    }
}
