// osoc-select-web/src/controllers.rs
// ============================================================================
// Module: Controllers
// Description: One axum router per selection-tool resource.
// Purpose: Translate HTTP requests into domain service calls.
// Dependencies: osoc-select-core, axum
// ============================================================================

//! ## Overview
//! Each controller module exposes a `router()` mount function and a `ROUTES`
//! table; both are wired into [`crate::registry`]. Controllers never touch
//! the session store or the security filter directly: authentication state
//! arrives, when a filter is interposed, as an [`crate::security::AuthContext`]
//! request extension.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod auth;
pub mod editions;
pub mod status_suggestions;
pub mod students;
pub mod users;
