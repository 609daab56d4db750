// osoc-select-web/src/security.rs
// ============================================================================
// Module: Security Filter
// Description: Bearer-token authentication and role enforcement for the web layer.
// Purpose: Provide a strict, fail-closed filter interposed before controllers.
// Dependencies: osoc-select-core, axum, serde
// ============================================================================

//! ## Overview
//! The security filter runs as an axum middleware layer in front of every
//! mounted controller. Public routes pass through untouched; every other
//! request must present a valid bearer session token owned by an account
//! with at least the Coach role. Decisions are fail-closed and emit audit
//! events. The unsecured test slice builds its router without this layer,
//! which is the only supported way to skip it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::extract::Request;
use axum::extract::State;
use axum::http::Method;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use osoc_select_core::Role;
use osoc_select_core::UserId;
use osoc_select_core::fingerprint;
use serde::Serialize;
use thiserror::Error;

use crate::app::AppState;
use crate::error::ApiError;
use crate::sessions::SessionError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Upper bound on accepted authorization header length.
const MAX_AUTH_HEADER_BYTES: usize = 8 * 1024;

/// Routes reachable without authentication, regardless of method.
const PUBLIC_PATHS: [&str; 4] = ["/", "/login", "/logout", "/error"];

// ============================================================================
// SECTION: Auth Context
// ============================================================================

/// Authenticated caller context inserted into request extensions.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Account the session resolves to.
    pub user_id: UserId,
    /// Permission level of that account.
    pub role: Role,
    /// Fingerprint of the presented token, for auditing.
    pub token_fingerprint: String,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Authentication or authorization errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or invalid authentication.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),
    /// Caller is authenticated but not authorized.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
}

impl From<&AuthError> for ApiError {
    fn from(err: &AuthError) -> Self {
        match err {
            AuthError::Unauthenticated(message) => {
                Self::new(axum::http::StatusCode::UNAUTHORIZED, message.clone())
            }
            AuthError::Unauthorized(message) => Self::forbidden(message.clone()),
        }
    }
}

// ============================================================================
// SECTION: Audit Events
// ============================================================================

/// Audit sink for auth decisions.
pub trait AuthAuditSink: Send + Sync {
    /// Record an auth audit event.
    fn record(&self, event: &AuthAuditEvent);
}

/// Auth audit event payload.
#[derive(Debug, Serialize)]
pub struct AuthAuditEvent {
    /// Event identifier.
    event: &'static str,
    /// Decision outcome.
    decision: &'static str,
    /// Request method.
    method: String,
    /// Request path.
    path: String,
    /// Caller subject (user id) when authenticated.
    subject: Option<String>,
    /// Session token fingerprint (sha256).
    token_fingerprint: Option<String>,
    /// Failure reason (for deny events).
    reason: Option<String>,
}

impl AuthAuditEvent {
    /// Builds an allow event.
    #[must_use]
    pub fn allowed(method: &Method, path: &str, auth: &AuthContext) -> Self {
        Self {
            event: "web_authz",
            decision: "allow",
            method: method.to_string(),
            path: path.to_string(),
            subject: Some(auth.user_id.to_string()),
            token_fingerprint: Some(auth.token_fingerprint.clone()),
            reason: None,
        }
    }

    /// Builds a deny event.
    #[must_use]
    pub fn denied(method: &Method, path: &str, error: &AuthError) -> Self {
        Self {
            event: "web_authz",
            decision: "deny",
            method: method.to_string(),
            path: path.to_string(),
            subject: None,
            token_fingerprint: None,
            reason: Some(error.to_string()),
        }
    }
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuthAuditSink for StderrAuditSink {
    #[allow(clippy::print_stderr, reason = "Stderr is the process audit stream.")]
    fn record(&self, event: &AuthAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            eprintln!("{payload}");
        }
    }
}

/// No-op audit sink for tests.
pub struct NoopAuditSink;

impl AuthAuditSink for NoopAuditSink {
    fn record(&self, _event: &AuthAuditEvent) {}
}

// ============================================================================
// SECTION: Middleware
// ============================================================================

/// Security filter middleware. Interposed only by secured router assembly.
pub async fn enforce(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    if is_public(&method, &path) {
        return next.run(request).await;
    }
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    match authorize(&state, auth_header.as_deref()) {
        Ok(auth) => {
            state.audit.record(&AuthAuditEvent::allowed(&method, &path, &auth));
            request.extensions_mut().insert(auth);
            next.run(request).await
        }
        Err(err) => {
            state.audit.record(&AuthAuditEvent::denied(&method, &path, &err));
            ApiError::from(&err).into_response()
        }
    }
}

/// Returns true for routes the policy leaves unauthenticated. Registration
/// is the only public write.
fn is_public(method: &Method, path: &str) -> bool {
    if PUBLIC_PATHS.contains(&path) {
        return true;
    }
    method == Method::POST && path == "/users"
}

/// Resolves the bearer token to an account and checks the minimum role.
fn authorize(state: &AppState, auth_header: Option<&str>) -> Result<AuthContext, AuthError> {
    let token = parse_bearer_token(auth_header)?;
    let user_id = state.sessions.resolve(&token).map_err(|err| match err {
        SessionError::Expired => AuthError::Unauthenticated("session expired".to_string()),
        SessionError::Unknown => AuthError::Unauthenticated("invalid session token".to_string()),
        SessionError::Internal => AuthError::Unauthenticated("session store unavailable".to_string()),
    })?;
    let user = state
        .services
        .users
        .get_by_id(&user_id)
        .map_err(|_| AuthError::Unauthenticated("session user no longer exists".to_string()))?;
    if !user.role.has_permission_level(Role::Coach) {
        return Err(AuthError::Unauthorized("account is disabled".to_string()));
    }
    Ok(AuthContext {
        user_id: user.id,
        role: user.role,
        token_fingerprint: fingerprint(token.as_bytes()),
    })
}

/// Parses a bearer token out of an authorization header value.
fn parse_bearer_token(auth_header: Option<&str>) -> Result<String, AuthError> {
    let header = auth_header
        .ok_or_else(|| AuthError::Unauthenticated("missing authorization".to_string()))?;
    if header.len() > MAX_AUTH_HEADER_BYTES {
        return Err(AuthError::Unauthenticated("authorization header too large".to_string()));
    }
    let mut parts = header.trim().splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    let token = parts.next().unwrap_or_default().trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::Unauthenticated("invalid authorization header".to_string()));
    }
    Ok(token.to_string())
}

// ============================================================================
// SECTION: Handler Guards
// ============================================================================

/// Requires the caller to hold at least the given role. An absent context
/// means no security filter is interposed (the unsecured slice), in which
/// case per-handler role checks are disabled along with it.
///
/// # Errors
///
/// Returns a 403 [`ApiError`] when a present context lacks the role.
pub fn require_role(auth: Option<&AuthContext>, minimum: Role) -> Result<(), ApiError> {
    match auth {
        None => Ok(()),
        Some(context) if context.role.has_permission_level(minimum) => Ok(()),
        Some(_) => Err(ApiError::forbidden("insufficient role")),
    }
}

/// Requires the caller to be an admin or the named account itself.
///
/// # Errors
///
/// Returns a 403 [`ApiError`] when a present context is neither.
pub fn require_admin_or_self(auth: Option<&AuthContext>, target: &UserId) -> Result<(), ApiError> {
    match auth {
        None => Ok(()),
        Some(context)
            if context.role.has_permission_level(Role::Admin) || &context.user_id == target =>
        {
            Ok(())
        }
        Some(_) => Err(ApiError::forbidden("insufficient role")),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only panic-based assertions."
    )]

    use axum::http::Method;
    use osoc_select_core::Role;
    use osoc_select_core::UserId;

    use super::AuthContext;
    use super::is_public;
    use super::parse_bearer_token;
    use super::require_role;

    fn context(role: Role) -> AuthContext {
        AuthContext {
            user_id: UserId::random(),
            role,
            token_fingerprint: "fp".to_string(),
        }
    }

    #[test]
    fn policy_leaves_login_and_registration_public() {
        assert!(is_public(&Method::POST, "/login"));
        assert!(is_public(&Method::POST, "/users"));
        assert!(is_public(&Method::GET, "/"));
        assert!(!is_public(&Method::GET, "/users"));
        assert!(!is_public(&Method::GET, "/students"));
    }

    #[test]
    fn bearer_parsing_rejects_malformed_headers() {
        assert!(parse_bearer_token(None).is_err());
        assert!(parse_bearer_token(Some("Basic abc")).is_err());
        assert!(parse_bearer_token(Some("Bearer ")).is_err());
        assert_eq!(parse_bearer_token(Some("Bearer abc")).unwrap(), "abc");
        assert_eq!(parse_bearer_token(Some("bearer abc")).unwrap(), "abc");
    }

    #[test]
    fn oversized_headers_are_rejected() {
        let header = format!("Bearer {}", "a".repeat(9 * 1024));
        assert!(parse_bearer_token(Some(&header)).is_err());
    }

    #[test]
    fn role_guard_skips_when_no_filter_is_interposed() {
        assert!(require_role(None, Role::Admin).is_ok());
    }

    #[test]
    fn role_guard_enforces_present_contexts() {
        assert!(require_role(Some(&context(Role::Admin)), Role::Admin).is_ok());
        assert!(require_role(Some(&context(Role::Coach)), Role::Admin).is_err());
    }
}
