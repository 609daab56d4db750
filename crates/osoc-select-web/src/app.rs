// osoc-select-web/src/app.rs
// ============================================================================
// Module: Application Assembly
// Description: Service bundle, shared state, and router construction.
// Purpose: Build secured and unsecured routers from the controller registry.
// Dependencies: osoc-select-core, axum, crate::registry, crate::security
// ============================================================================

//! ## Overview
//! [`build_router`] is the single place routers come from: it mounts the
//! requested controllers on top of the dispatch infrastructure (the root
//! probe and the body-size limit) and interposes the security filter only
//! when asked to. The full server always enforces; the unsecured test slice
//! always excludes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::get;
use osoc_select_core::EditionService;
use osoc_select_core::InMemoryEditionService;
use osoc_select_core::InMemoryStudentService;
use osoc_select_core::InMemoryUserService;
use osoc_select_core::StatusSuggestionService;
use osoc_select_core::StudentService;
use osoc_select_core::UserService;
use serde_json::Value;
use serde_json::json;

use crate::config::SelectConfig;
use crate::registry::ControllerSpec;
use crate::security;
use crate::security::AuthAuditSink;
use crate::security::NoopAuditSink;
use crate::sessions::SessionStore;

// ============================================================================
// SECTION: Services
// ============================================================================

/// The domain services the controllers dispatch to.
#[derive(Clone)]
pub struct Services {
    /// Student pipeline service.
    pub students: Arc<dyn StudentService>,
    /// Suggestion lookup service.
    pub suggestions: Arc<dyn StatusSuggestionService>,
    /// Edition lifecycle service.
    pub editions: Arc<dyn EditionService>,
    /// Account service.
    pub users: Arc<dyn UserService>,
}

impl Services {
    /// Creates a fresh in-memory service bundle.
    #[must_use]
    pub fn in_memory() -> Self {
        let editions = Arc::new(InMemoryEditionService::new());
        let students = Arc::new(InMemoryStudentService::new(editions.clone()));
        Self {
            students: students.clone(),
            suggestions: students,
            editions,
            users: Arc::new(InMemoryUserService::new()),
        }
    }
}

// ============================================================================
// SECTION: Application State
// ============================================================================

/// Shared state handed to every controller.
#[derive(Clone)]
pub struct AppState {
    /// Domain services.
    pub services: Services,
    /// Login session store.
    pub sessions: Arc<SessionStore>,
    /// Audit sink for auth decisions.
    pub audit: Arc<dyn AuthAuditSink>,
    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl AppState {
    /// Builds state from configuration with the given services and sink.
    #[must_use]
    pub fn new(config: &SelectConfig, services: Services, audit: Arc<dyn AuthAuditSink>) -> Self {
        Self {
            services,
            sessions: Arc::new(SessionStore::new(Duration::from_secs(
                config.auth.session_ttl_secs,
            ))),
            audit,
            max_body_bytes: config.server.max_body_bytes,
        }
    }

    /// Builds state with fresh in-memory services and a silent audit sink.
    /// Used by the test slice.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(&SelectConfig::default(), Services::in_memory(), Arc::new(NoopAuditSink))
    }
}

// ============================================================================
// SECTION: Security Posture
// ============================================================================

/// Whether the security filter is interposed in front of the controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityPosture {
    /// The filter runs before every request.
    Enforced,
    /// No filter; requests reach controllers unauthenticated.
    Excluded,
}

// ============================================================================
// SECTION: Router Assembly
// ============================================================================

/// Builds a router mounting the given controllers with the given posture.
#[must_use]
pub fn build_router(
    state: AppState,
    specs: &[&ControllerSpec],
    posture: SecurityPosture,
) -> Router {
    let mut router = Router::new().route("/", get(root));
    for spec in specs {
        router = router.merge((spec.mount)());
    }
    if posture == SecurityPosture::Enforced {
        router = router.layer(middleware::from_fn_with_state(state.clone(), security::enforce));
    }
    router
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .with_state(state)
}

/// Root probe. Public by policy; reports the service name.
async fn root() -> Json<Value> {
    Json(json!({ "service": "osoc-select", "status": "ok" }))
}
