// osoc-select-web/src/controllers/status_suggestions.rs
// ============================================================================
// Module: Status Suggestion Controller
// Description: Suggestion lookup endpoint.
// Purpose: Resolve individual suggestions by id.
// Dependencies: osoc-select-core, axum
// ============================================================================

//! ## Overview
//! Suggestions are created and deleted through the student controller;
//! this controller only resolves one by id. An unknown id is a 404.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::extract::State;
use axum::routing::get;
use osoc_select_core::StatusSuggestion;
use osoc_select_core::SuggestionId;

use crate::app::AppState;
use crate::error::ApiError;
use crate::registry::Route;

// ============================================================================
// SECTION: Routes
// ============================================================================

/// Route table for the status suggestion controller.
pub static ROUTES: &[Route] = &[Route {
    method: "GET",
    path: "/statusSuggestions/{suggestion_id}",
}];

/// Mounts the status suggestion controller.
#[must_use]
pub fn router() -> Router<AppState> {
    Router::new().route("/statusSuggestions/{suggestion_id}", get(get_suggestion))
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Returns the suggestion with the given id.
async fn get_suggestion(
    State(state): State<AppState>,
    Path(suggestion_id): Path<String>,
) -> Result<Json<StatusSuggestion>, ApiError> {
    Ok(Json(state.services.suggestions.get_by_id(&SuggestionId::new(suggestion_id))?))
}
