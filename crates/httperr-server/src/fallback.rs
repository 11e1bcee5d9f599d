use axum::extract::State;
use http::{Method, Uri};
use httperr_core::ErrorResponse;

use crate::error::ServerError;
use crate::state::AppState;

/// Fallback for paths without a route
pub async fn not_found(State(state): State<AppState>, uri: Uri) -> ErrorResponse {
    state.reject(&ServerError::NoRoute(uri.path().to_owned()))
}

/// Fallback for known paths requested with an unsupported method
pub async fn method_not_allowed(State(state): State<AppState>, method: Method, uri: Uri) -> ErrorResponse {
    state.reject(&ServerError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_owned(),
    })
}
