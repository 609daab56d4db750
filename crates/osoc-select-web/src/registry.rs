// osoc-select-web/src/registry.rs
// ============================================================================
// Module: Controller Registry
// Description: Static registry of every mountable controller.
// Purpose: Replace implicit component scanning with an explicit lookup table.
// Dependencies: axum, crate::controllers
// ============================================================================

//! ## Overview
//! Every controller is described by a [`ControllerSpec`]: a canonical name,
//! its route table, and a mount function producing its axum router. The full
//! server mounts the whole registry; the unsecured test slice selects a
//! subset by name and fails fast on names the registry does not know.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::Router;

use crate::app::AppState;
use crate::controllers;

// ============================================================================
// SECTION: Registry Types
// ============================================================================

/// One route exposed by a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// HTTP method.
    pub method: &'static str,
    /// Route path in axum syntax.
    pub path: &'static str,
}

/// A mountable controller.
pub struct ControllerSpec {
    /// Canonical controller name used for slice selection.
    pub name: &'static str,
    /// Routes the controller mounts, for inspection and docs.
    pub routes: &'static [Route],
    /// Produces the controller's router.
    pub mount: fn() -> Router<AppState>,
}

// ============================================================================
// SECTION: Registry Table
// ============================================================================

/// The registry of every controller in the application.
static REGISTRY: [ControllerSpec; 5] = [
    ControllerSpec {
        name: "auth",
        routes: controllers::auth::ROUTES,
        mount: controllers::auth::router,
    },
    ControllerSpec {
        name: "editions",
        routes: controllers::editions::ROUTES,
        mount: controllers::editions::router,
    },
    ControllerSpec {
        name: "statusSuggestions",
        routes: controllers::status_suggestions::ROUTES,
        mount: controllers::status_suggestions::router,
    },
    ControllerSpec {
        name: "students",
        routes: controllers::students::ROUTES,
        mount: controllers::students::router,
    },
    ControllerSpec {
        name: "users",
        routes: controllers::users::ROUTES,
        mount: controllers::users::router,
    },
];

/// Returns every registered controller.
#[must_use]
pub fn registry() -> &'static [ControllerSpec] {
    &REGISTRY
}

/// Looks a controller up by its canonical name.
#[must_use]
pub fn find(name: &str) -> Option<&'static ControllerSpec> {
    REGISTRY.iter().find(|spec| spec.name == name)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::panic, reason = "Test-only panic-based assertions.")]

    use super::find;
    use super::registry;

    #[test]
    fn registry_names_are_unique_and_sorted() {
        let names: Vec<&str> = registry().iter().map(|spec| spec.name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn every_controller_declares_routes() {
        for spec in registry() {
            assert!(!spec.routes.is_empty(), "{} has no routes", spec.name);
        }
    }

    #[test]
    fn lookup_is_by_exact_name() {
        assert!(find("students").is_some());
        assert!(find("Students").is_none());
        assert!(find("projects").is_none());
    }
}
