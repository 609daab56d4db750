// osoc-select-webtest/src/harness.rs
// ============================================================================
// Module: Slice Server Harness
// Description: Ephemeral-port serving for built test applications.
// Purpose: Provide deterministic startup and teardown for HTTP-level tests.
// Dependencies: axum, tokio
// ============================================================================

//! ## Overview
//! Tests that exercise real request dispatch spawn their application on an
//! ephemeral loopback port and talk HTTP to it. [`serve_router`] accepts
//! any router, so the same harness serves both the unsecured slice and a
//! fully secured application when a test needs to compare the two.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::Router;
use tokio::task::JoinHandle;

use crate::slice::SliceError;

// ============================================================================
// SECTION: Server Handle
// ============================================================================

/// Handle for a spawned test server.
pub struct SliceServerHandle {
    /// Base URL of the spawned server, e.g. `http://127.0.0.1:49152`.
    base_url: String,
    /// The serving task.
    join: JoinHandle<Result<(), std::io::Error>>,
}

impl SliceServerHandle {
    /// Returns the server's base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Shuts the server task down.
    pub async fn shutdown(self) {
        self.join.abort();
        let _ = self.join.await;
    }
}

// Intentionally no Drop impl: runtime shutdown tears spawned servers down.

/// Serves a router on an ephemeral loopback port.
///
/// # Errors
///
/// Returns [`SliceError::Transport`] when binding fails.
pub async fn serve_router(router: Router) -> Result<SliceServerHandle, SliceError> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| SliceError::Transport(format!("failed to bind loopback: {err}")))?;
    let addr = listener
        .local_addr()
        .map_err(|err| SliceError::Transport(format!("failed to read listener address: {err}")))?;
    let join = tokio::spawn(async move { axum::serve(listener, router).await });
    Ok(SliceServerHandle {
        base_url: format!("http://{addr}"),
        join,
    })
}
