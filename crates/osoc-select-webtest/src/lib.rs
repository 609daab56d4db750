// osoc-select-webtest/src/lib.rs
// ============================================================================
// Module: Web Test Slice
// Description: Unsecured web-layer test fixtures for the selection backend.
// Purpose: Build partial, filter-free applications for controller tests.
// Dependencies: osoc-select-web, axum, tokio
// ============================================================================

//! ## Overview
//! Controller tests want the web layer and nothing else: a router holding a
//! chosen subset of controllers, real request dispatch, and no security
//! filter in front, so requests reach handlers without credentials.
//! [`UnsecuredWebSlice`] builds exactly that. Pair it with
//! [`Services`](osoc_select_web::Services) overrides to stub the domain
//! layer underneath the controllers under test.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod harness;
pub mod slice;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use harness::SliceServerHandle;
pub use slice::SliceError;
pub use slice::TestApp;
pub use slice::UnsecuredWebSlice;
