// osoc-select-web/src/controllers/users.rs
// ============================================================================
// Module: User Controller
// Description: Account management endpoints.
// Purpose: Expose registration, lookup, role changes, and deletion.
// Dependencies: osoc-select-core, axum
// ============================================================================

//! ## Overview
//! Registration is the one public write in the application; it always
//! produces a `Disabled` account. Role changes are admin-only, and the
//! service refuses to demote the last remaining admin. Lookup and deletion
//! are allowed to admins and to the account itself.

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
use osoc_select_core::Role;
use osoc_select_core::User;
use osoc_select_core::UserDraft;
use osoc_select_core::UserId;
use serde::Deserialize;

use crate::app::AppState;
use crate::error::ApiError;
use crate::registry::Route;
use crate::security::AuthContext;
use crate::security::require_admin_or_self;
use crate::security::require_role;

// ============================================================================
// SECTION: Routes
// ============================================================================

/// Route table for the user controller.
pub static ROUTES: &[Route] = &[
    Route {
        method: "GET",
        path: "/users",
    },
    Route {
        method: "POST",
        path: "/users",
    },
    Route {
        method: "GET",
        path: "/users/{user_id}",
    },
    Route {
        method: "DELETE",
        path: "/users/{user_id}",
    },
    Route {
        method: "POST",
        path: "/users/{user_id}/role",
    },
];

/// Mounts the user controller.
#[must_use]
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(register_user))
        .route("/users/{user_id}", get(get_user).delete(delete_user))
        .route("/users/{user_id}/role", post(set_role))
}

// ============================================================================
// SECTION: Payloads
// ============================================================================

/// Role change body.
#[derive(Debug, Deserialize)]
struct RoleRequest {
    /// The new role.
    role: Role,
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Lists every account. Admin-only.
async fn list_users(
    State(state): State<AppState>,
    auth: Option<Extension<AuthContext>>,
) -> Result<Json<Vec<User>>, ApiError> {
    require_role(auth.as_deref(), Role::Admin)?;
    Ok(Json(state.services.users.list()?))
}

/// Registers a new account. Public by policy.
async fn register_user(
    State(state): State<AppState>,
    Json(draft): Json<UserDraft>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.services.users.register(draft)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Returns one account. Admin or the account itself.
async fn get_user(
    State(state): State<AppState>,
    auth: Option<Extension<AuthContext>>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id = UserId::new(user_id);
    require_admin_or_self(auth.as_deref(), &id)?;
    Ok(Json(state.services.users.get_by_id(&id)?))
}

/// Deletes one account. Admin or the account itself.
async fn delete_user(
    State(state): State<AppState>,
    auth: Option<Extension<AuthContext>>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = UserId::new(user_id);
    require_admin_or_self(auth.as_deref(), &id)?;
    state.services.users.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Changes an account's role. Admin-only.
async fn set_role(
    State(state): State<AppState>,
    auth: Option<Extension<AuthContext>>,
    Path(user_id): Path<String>,
    Json(request): Json<RoleRequest>,
) -> Result<StatusCode, ApiError> {
    require_role(auth.as_deref(), Role::Admin)?;
    state.services.users.set_role(&UserId::new(user_id), request.role)?;
    Ok(StatusCode::NO_CONTENT)
}
