use axum::{
    Json,
    extract::{Path, State},
};
use httperr_core::{ErrorCategory, ErrorResponse};
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::error::ServerError;
use crate::state::AppState;

/// One registry entry as listed by the catalog
#[derive(Debug, Serialize)]
pub struct CategoryInfo {
    pub category: ErrorCategory,
    pub code: u16,
    pub message: &'static str,
}

impl From<ErrorCategory> for CategoryInfo {
    fn from(category: ErrorCategory) -> Self {
        let entry = category.entry();
        Self {
            category,
            code: entry.status.as_u16(),
            message: entry.message,
        }
    }
}

/// Handle `GET /v1/categories`
pub async fn list_categories() -> Json<Vec<CategoryInfo>> {
    Json(ErrorCategory::iter().map(CategoryInfo::from).collect())
}

/// Handle `GET /v1/categories/{category}`
///
/// Returns the bare document a service would send for the category.
pub async fn show_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ErrorResponse>, ErrorResponse> {
    let category = name
        .parse::<ErrorCategory>()
        .map_err(|_| state.reject(&ServerError::UnknownCategory(name.clone())))?;

    Ok(Json(ErrorResponse::new(category, [])))
}
