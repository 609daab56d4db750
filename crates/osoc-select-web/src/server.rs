// osoc-select-web/src/server.rs
// ============================================================================
// Module: Selection Server
// Description: Full-application server assembly and serving loop.
// Purpose: Boot the secured backend from validated configuration.
// Dependencies: osoc-select-core, axum, tokio
// ============================================================================

//! ## Overview
//! The full server always mounts every registered controller and always
//! interposes the security filter. Building an unsecured or partial
//! application is the test slice's job, not this module's.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;

use osoc_select_core::Role;
use osoc_select_core::UserDraft;
use thiserror::Error;

use crate::app::AppState;
use crate::app::SecurityPosture;
use crate::app::Services;
use crate::app::build_router;
use crate::config::SelectConfig;
use crate::registry::ControllerSpec;
use crate::registry::registry;
use crate::security::StderrAuditSink;

// ============================================================================
// SECTION: Server
// ============================================================================

/// The selection backend server.
pub struct SelectServer {
    /// Validated configuration.
    config: SelectConfig,
    /// Shared application state.
    state: AppState,
}

impl SelectServer {
    /// Builds a server from configuration, seeding the bootstrap admin.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when validation or admin seeding fails.
    pub fn from_config(config: SelectConfig) -> Result<Self, ServerError> {
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        let services = Services::in_memory();
        if let Some(admin) = &config.auth.bootstrap_admin {
            let user = services
                .users
                .register(UserDraft {
                    username: admin.username.clone(),
                    email: admin.email.clone(),
                    password: admin.password.clone(),
                })
                .map_err(|err| ServerError::Init(err.to_string()))?;
            services
                .users
                .set_role(&user.id, Role::Admin)
                .map_err(|err| ServerError::Init(err.to_string()))?;
        }
        let state = AppState::new(&config, services, Arc::new(StderrAuditSink));
        Ok(Self {
            config,
            state,
        })
    }

    /// Returns the shared application state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Serves the secured application on the configured bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let bind = self
            .config
            .server
            .bind
            .as_ref()
            .ok_or_else(|| ServerError::Config("bind address required".to_string()))?;
        let addr: SocketAddr =
            bind.parse().map_err(|_| ServerError::Config("invalid bind address".to_string()))?;
        let specs: Vec<&ControllerSpec> = registry().iter().collect();
        let app = build_router(self.state, &specs, SecurityPosture::Enforced);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|_| ServerError::Transport("http bind failed".to_string()))?;
        axum::serve(listener, app)
            .await
            .map_err(|_| ServerError::Transport("http server failed".to_string()))
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Selection server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only panic-based assertions."
    )]

    use osoc_select_core::Role;

    use super::SelectServer;
    use crate::config::SelectConfig;

    #[test]
    fn bootstrap_admin_is_seeded_with_admin_role() {
        let config: SelectConfig = toml::from_str(
            "[auth.bootstrap_admin]\nusername = \"root\"\nemail = \"root@osoc.be\"\npassword = \"secret\"\n",
        )
        .unwrap();
        let server = SelectServer::from_config(config).unwrap();
        let admin = server.state().services.users.authenticate("root@osoc.be", "secret").unwrap();
        assert_eq!(admin.role, Role::Admin);
    }

    #[test]
    fn invalid_config_is_rejected_at_build_time() {
        let config: SelectConfig = toml::from_str("[auth]\nsession_ttl_secs = 1\n").unwrap();
        assert!(SelectServer::from_config(config).is_err());
    }
}
