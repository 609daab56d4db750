// osoc-select-web/src/controllers/auth.rs
// ============================================================================
// Module: Auth Controller
// Description: Login and logout endpoints.
// Purpose: Exchange credentials for bearer session tokens.
// Dependencies: osoc-select-core, axum
// ============================================================================

//! ## Overview
//! `POST /login` exchanges email and password for an opaque session token;
//! `POST /logout` revokes the presented token. Both routes are public by
//! policy: login has nothing to authenticate with yet, and revoking an
//! already-invalid token is harmless.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::routing::post;
use osoc_select_core::User;
use serde::Deserialize;
use serde::Serialize;

use crate::app::AppState;
use crate::error::ApiError;
use crate::registry::Route;

// ============================================================================
// SECTION: Routes
// ============================================================================

/// Route table for the auth controller.
pub static ROUTES: &[Route] = &[
    Route {
        method: "POST",
        path: "/login",
    },
    Route {
        method: "POST",
        path: "/logout",
    },
];

/// Mounts the auth controller.
#[must_use]
pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(login)).route("/logout", post(logout))
}

// ============================================================================
// SECTION: Payloads
// ============================================================================

/// Login request body.
#[derive(Debug, Deserialize)]
struct LoginRequest {
    /// Account email.
    email: String,
    /// Plaintext password.
    password: String,
}

/// Login response body.
#[derive(Debug, Serialize)]
struct LoginResponse {
    /// Bearer session token, returned exactly once.
    token: String,
    /// The authenticated account.
    user: User,
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Exchanges credentials for a session token.
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .services
        .users
        .authenticate(&request.email, &request.password)
        .map_err(|_| ApiError::new(StatusCode::UNAUTHORIZED, "invalid credentials"))?;
    let token = state
        .sessions
        .issue(user.id.clone())
        .map_err(|err| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?;
    Ok(Json(LoginResponse {
        token,
        user,
    }))
}

/// Revokes the presented session token.
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<StatusCode, ApiError> {
    if let Some(header) = headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok())
        && let Some(token) =
            header.strip_prefix("Bearer ").or_else(|| header.strip_prefix("bearer "))
    {
        state
            .sessions
            .revoke(token.trim())
            .map_err(|err| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?;
    }
    Ok(StatusCode::NO_CONTENT)
}
