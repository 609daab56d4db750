// osoc-select-webtest/src/slice.rs
// ============================================================================
// Module: Unsecured Web Slice
// Description: Builder for partial, filter-free web applications.
// Purpose: Let controller tests mount a chosen controller subset with no
//          security filter interposed.
// Dependencies: osoc-select-web, axum
// ============================================================================

//! ## Overview
//! [`UnsecuredWebSlice`] selects controllers by the canonical names the
//! registry knows. Leaving the selection empty mounts the whole registry.
//! Names the registry does not know fail the build immediately rather than
//! producing an application that silently 404s the controller under test.
//!
//! The built application never interposes the security filter. Requests
//! reach the selected controllers without credentials, and handler role
//! guards stand down because no authentication context is attached.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use axum::Router;
use osoc_select_web::AppState;
use osoc_select_web::NoopAuditSink;
use osoc_select_web::SecurityPosture;
use osoc_select_web::SelectConfig;
use osoc_select_web::Services;
use osoc_select_web::build_router;
use osoc_select_web::registry;
use osoc_select_web::registry::ControllerSpec;
use osoc_select_web::registry::Route;
use thiserror::Error;

use crate::harness::SliceServerHandle;
use crate::harness::serve_router;

// ============================================================================
// SECTION: Slice Builder
// ============================================================================

/// Builder for an unsecured web application slice.
#[derive(Default)]
pub struct UnsecuredWebSlice {
    /// Selected controller names, in selection order.
    controllers: Vec<String>,
    /// Service bundle override; fresh in-memory services when absent.
    services: Option<Services>,
}

impl UnsecuredWebSlice {
    /// Creates an empty slice selecting every controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the slice to the named controllers. Appends to any
    /// previous selection.
    #[must_use]
    pub fn controllers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.controllers.extend(names.into_iter().map(Into::into));
        self
    }

    /// Alias for [`Self::controllers`]; both feed the same selection.
    #[must_use]
    pub fn only<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.controllers(names)
    }

    /// Replaces the in-memory service bundle, typically with stubs.
    #[must_use]
    pub fn with_services(mut self, services: Services) -> Self {
        self.services = Some(services);
        self
    }

    /// Resolves the selection and builds the filter-free application.
    ///
    /// # Errors
    ///
    /// Returns [`SliceError::UnknownController`] for names the registry
    /// does not know and [`SliceError::DuplicateController`] for repeated
    /// names.
    pub fn build(self) -> Result<TestApp, SliceError> {
        let specs = resolve(&self.controllers)?;
        let state = self.services.map_or_else(AppState::in_memory, |services| {
            AppState::new(&SelectConfig::default(), services, Arc::new(NoopAuditSink))
        });
        let router = build_router(state.clone(), &specs, SecurityPosture::Excluded);
        Ok(TestApp {
            state,
            specs,
            router,
        })
    }
}

/// Resolves names against the registry; an empty selection means all.
fn resolve(names: &[String]) -> Result<Vec<&'static ControllerSpec>, SliceError> {
    if names.is_empty() {
        return Ok(registry::registry().iter().collect());
    }
    let mut specs = Vec::with_capacity(names.len());
    for name in names {
        if names.iter().filter(|other| *other == name).count() > 1 {
            return Err(SliceError::DuplicateController(name.clone()));
        }
        let spec = registry::find(name)
            .ok_or_else(|| SliceError::UnknownController(name.clone()))?;
        specs.push(spec);
    }
    Ok(specs)
}

// ============================================================================
// SECTION: Test Application
// ============================================================================

/// A built unsecured application slice.
pub struct TestApp {
    /// Shared application state.
    state: AppState,
    /// Mounted controllers, in selection order.
    specs: Vec<&'static ControllerSpec>,
    /// The assembled router.
    router: Router,
}

impl TestApp {
    /// Returns the names of the mounted controllers.
    #[must_use]
    pub fn controller_names(&self) -> Vec<&'static str> {
        self.specs.iter().map(|spec| spec.name).collect()
    }

    /// Returns every route the mounted controllers expose.
    #[must_use]
    pub fn routes(&self) -> Vec<Route> {
        self.specs.iter().flat_map(|spec| spec.routes.iter().copied()).collect()
    }

    /// True for every slice: the security filter is never interposed.
    #[must_use]
    pub const fn security_excluded(&self) -> bool {
        true
    }

    /// Returns the shared application state, for seeding fixtures.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Consumes the slice, yielding the bare router.
    #[must_use]
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Serves the slice on an ephemeral loopback port.
    ///
    /// # Errors
    ///
    /// Returns [`SliceError::Transport`] when binding fails.
    pub async fn serve(self) -> Result<SliceServerHandle, SliceError> {
        serve_router(self.router).await
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Slice construction errors.
#[derive(Debug, Error)]
pub enum SliceError {
    /// A selected name matches no registered controller.
    #[error("unknown controller: '{0}'")]
    UnknownController(String),
    /// A controller was selected more than once.
    #[error("controller selected twice: '{0}'")]
    DuplicateController(String),
    /// Binding or serving the slice failed.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================
