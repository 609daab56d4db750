// osoc-select-web/src/lib.rs
// ============================================================================
// Module: OSOC Select Web Library
// Description: Axum web layer for the OSOC selection backend.
// Purpose: Provide controllers, the security filter, and server assembly.
// Dependencies: osoc-select-core, axum, tokio
// ============================================================================

//! ## Overview
//! This crate mounts the selection-tool controllers on an axum router and
//! interposes a bearer-token security filter in front of them. Controllers
//! are described by a static registry so callers (the full server and the
//! unsecured test slice) can mount all of them or a named subset. The
//! security filter is a separate layer: assembling a router without it is a
//! supported, explicit configuration, not a bypass.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod app;
pub mod config;
pub mod controllers;
pub mod error;
pub mod registry;
pub mod security;
pub mod server;
pub mod sessions;

#[cfg(test)]
mod tests {
    //! Test-only lint relaxations for panic-based assertions and debug output.
    #![allow(
        clippy::panic,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::use_debug,
        clippy::dbg_macro,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        reason = "Test-only output and panic-based assertions are permitted."
    )]
}

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use app::AppState;
pub use app::SecurityPosture;
pub use app::Services;
pub use app::build_router;
pub use config::SelectConfig;
pub use error::ApiError;
pub use registry::ControllerSpec;
pub use registry::Route;
pub use registry::registry;
pub use security::AuthAuditEvent;
pub use security::AuthAuditSink;
pub use security::AuthContext;
pub use security::AuthError;
pub use security::NoopAuditSink;
pub use security::StderrAuditSink;
pub use server::SelectServer;
pub use sessions::SessionStore;
