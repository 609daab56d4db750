// system-tests/src/lib.rs
// ============================================================================
// Module: OSOC Select System Tests Library
// Description: Crate root for end-to-end system test binaries.
// Purpose: Anchor the system-test suites under `system-tests/tests`.
// Dependencies: std
// ============================================================================

//! ## Overview
//! End-to-end suites boot the real server on a loopback port and drive it
//! over HTTP. The suites live in `system-tests/tests`; shared plumbing is
//! in their `helpers` module.
