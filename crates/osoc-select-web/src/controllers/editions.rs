// osoc-select-web/src/controllers/editions.rs
// ============================================================================
// Module: Edition Controller
// Description: Edition lifecycle endpoints.
// Purpose: Expose listing, activation, and deletion of editions.
// Dependencies: osoc-select-core, axum
// ============================================================================

//! ## Overview
//! Reading editions needs only the Coach role the filter already enforces;
//! creating, activating, and deleting them is admin-only. Activation
//! implicitly deactivates the previous edition, preserving the single-active
//! invariant.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::Extension;
use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::routing::post;
use osoc_select_core::Edition;
use osoc_select_core::EditionName;
use osoc_select_core::Role;
use serde::Deserialize;

use crate::app::AppState;
use crate::error::ApiError;
use crate::registry::Route;
use crate::security::AuthContext;
use crate::security::require_role;

// ============================================================================
// SECTION: Routes
// ============================================================================

/// Route table for the edition controller.
pub static ROUTES: &[Route] = &[
    Route {
        method: "GET",
        path: "/editions",
    },
    Route {
        method: "POST",
        path: "/editions",
    },
    Route {
        method: "GET",
        path: "/editions/active",
    },
    Route {
        method: "GET",
        path: "/editions/{name}",
    },
    Route {
        method: "POST",
        path: "/editions/{name}/activate",
    },
    Route {
        method: "DELETE",
        path: "/editions/{name}",
    },
];

/// Mounts the edition controller.
#[must_use]
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/editions", get(list_editions).post(create_edition))
        .route("/editions/active", get(get_active_edition))
        .route("/editions/{name}/activate", post(activate_edition))
        .route("/editions/{name}", get(get_edition).delete(delete_edition))
}

// ============================================================================
// SECTION: Payloads
// ============================================================================

/// Edition creation body.
#[derive(Debug, Deserialize)]
struct EditionRequest {
    /// Name of the new edition.
    name: String,
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Lists all editions.
async fn list_editions(State(state): State<AppState>) -> Result<Json<Vec<Edition>>, ApiError> {
    Ok(Json(state.services.editions.list()?))
}

/// Returns the active edition, or 404 when none is active.
async fn get_active_edition(State(state): State<AppState>) -> Result<Json<Edition>, ApiError> {
    state
        .services
        .editions
        .get_active()?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("no active edition"))
}

/// Returns one edition by name.
async fn get_edition(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Edition>, ApiError> {
    Ok(Json(state.services.editions.get(&EditionName::new(name))?))
}

/// Creates an inactive edition. Admin-only.
async fn create_edition(
    State(state): State<AppState>,
    auth: Option<Extension<AuthContext>>,
    Json(request): Json<EditionRequest>,
) -> Result<(StatusCode, Json<Edition>), ApiError> {
    require_role(auth.as_deref(), Role::Admin)?;
    let edition = state.services.editions.create(EditionName::new(request.name))?;
    Ok((StatusCode::CREATED, Json(edition)))
}

/// Activates an edition, creating it when missing. Admin-only.
async fn activate_edition(
    State(state): State<AppState>,
    auth: Option<Extension<AuthContext>>,
    Path(name): Path<String>,
) -> Result<Json<Edition>, ApiError> {
    require_role(auth.as_deref(), Role::Admin)?;
    Ok(Json(state.services.editions.activate(EditionName::new(name))?))
}

/// Deletes an edition. Admin-only.
async fn delete_edition(
    State(state): State<AppState>,
    auth: Option<Extension<AuthContext>>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    require_role(auth.as_deref(), Role::Admin)?;
    state.services.editions.delete(&EditionName::new(name))?;
    Ok(StatusCode::NO_CONTENT)
}
