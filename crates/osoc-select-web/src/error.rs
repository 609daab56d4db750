// osoc-select-web/src/error.rs
// ============================================================================
// Module: Web Error Mapping
// Description: HTTP error envelope for controller failures.
// Purpose: Map domain errors onto HTTP statuses with a stable JSON body.
// Dependencies: axum, osoc-select-core, serde_json
// ============================================================================

//! ## Overview
//! Controllers return [`ApiError`] for every failure. Domain errors map
//! one-to-one: invalid id is 404, conflict is 409, forbidden operation is
//! 403, validation is 400, and internal failures are 500. The body is a
//! single-field JSON object so clients never parse free-form text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use osoc_select_core::CoreError;
use serde_json::json;

// ============================================================================
// SECTION: API Error
// ============================================================================

/// A controller failure with its HTTP rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status the failure maps to.
    pub status: StatusCode,
    /// Message safe to surface to callers.
    pub message: String,
}

impl ApiError {
    /// Builds an error with an explicit status.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Builds a 404 for a missing entity.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Builds a 403 for an operation the caller may not perform.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    /// Builds a 400 for malformed input.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let status = match &err {
            CoreError::InvalidId(_) => StatusCode::NOT_FOUND,
            CoreError::Conflict(_) => StatusCode::CONFLICT,
            CoreError::ForbiddenOperation(_) => StatusCode::FORBIDDEN,
            CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            CoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::panic, reason = "Test-only panic-based assertions.")]

    use axum::http::StatusCode;
    use osoc_select_core::CoreError;

    use super::ApiError;

    #[test]
    fn domain_errors_map_to_expected_statuses() {
        let cases = [
            (CoreError::InvalidId("x".to_string()), StatusCode::NOT_FOUND),
            (CoreError::Conflict("x".to_string()), StatusCode::CONFLICT),
            (CoreError::ForbiddenOperation("x".to_string()), StatusCode::FORBIDDEN),
            (CoreError::Validation("x".to_string()), StatusCode::BAD_REQUEST),
            (CoreError::Internal("x".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }
}
