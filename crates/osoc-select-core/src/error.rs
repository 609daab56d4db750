// osoc-select-core/src/error.rs
// ============================================================================
// Module: Selection Core Errors
// Description: Error taxonomy for domain service operations.
// Purpose: Provide one stable error surface for the web layer to map to HTTP.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Every service operation reports failures through [`CoreError`]. The
//! variants are deliberately coarse: the web layer maps them one-to-one onto
//! HTTP statuses (not found, conflict, forbidden, bad request) and the inner
//! message is safe to surface to callers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Domain service errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The referenced entity does not exist.
    #[error("invalid id: {0}")]
    InvalidId(String),
    /// The operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),
    /// The operation is not allowed regardless of caller identity.
    #[error("forbidden operation: {0}")]
    ForbiddenOperation(String),
    /// The input failed validation.
    #[error("validation failed: {0}")]
    Validation(String),
    /// Internal service failure (poisoned lock or similar).
    #[error("internal error: {0}")]
    Internal(String),
}
