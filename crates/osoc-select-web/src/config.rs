// osoc-select-web/src/config.rs
// ============================================================================
// Module: Web Configuration
// Description: Configuration loading and validation for the selection server.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size limits and
//! unknown fields rejected. Missing or invalid configuration fails closed:
//! the server refuses to start rather than guessing at defaults for
//! security-relevant settings.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "osoc-select.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "OSOC_SELECT_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Default maximum request body size in bytes.
pub(crate) const DEFAULT_MAX_BODY_BYTES: usize = 256 * 1024;
/// Maximum allowed request body size in bytes.
pub(crate) const MAX_MAX_BODY_BYTES: usize = 8 * 1024 * 1024;
/// Default session lifetime in seconds.
pub(crate) const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60;
/// Minimum allowed session lifetime in seconds.
pub(crate) const MIN_SESSION_TTL_SECS: u64 = 60;
/// Maximum allowed session lifetime in seconds.
pub(crate) const MAX_SESSION_TTL_SECS: u64 = 30 * 24 * 60 * 60;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Top-level selection server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address, e.g. `127.0.0.1:8080`.
    pub bind: Option<String>,
    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Session lifetime in seconds.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
    /// Admin account seeded at startup so role management is reachable.
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            bootstrap_admin: None,
        }
    }
}

/// Credentials for the seeded admin account.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BootstrapAdmin {
    /// Display name.
    pub username: String,
    /// Login email.
    pub email: String,
    /// Plaintext password, fingerprinted before storage.
    pub password: String,
}

/// Serde default for [`ServerConfig::max_body_bytes`].
const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// Serde default for [`AuthConfig::session_ttl_secs`].
const fn default_session_ttl_secs() -> u64 {
    DEFAULT_SESSION_TTL_SECS
}

// ============================================================================
// SECTION: Loading and Validation
// ============================================================================

impl SelectConfig {
    /// Loads configuration from the given path, the `OSOC_SELECT_CONFIG`
    /// environment variable, or `osoc-select.toml` in that order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is missing, oversized,
    /// malformed, or fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = resolve_path(path);
        let metadata =
            fs::metadata(&path).map_err(|err| ConfigError::Read(path.clone(), err.to_string()))?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE as u64 {
            return Err(ConfigError::TooLarge(path, metadata.len()));
        }
        let contents =
            fs::read_to_string(&path).map_err(|err| ConfigError::Read(path.clone(), err.to_string()))?;
        let config: Self =
            toml::from_str(&contents).map_err(|err| ConfigError::Parse(path, err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates bounds on every configured value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(bind) = &self.server.bind {
            bind.parse::<SocketAddr>().map_err(|_| {
                ConfigError::Invalid(format!("server.bind is not a socket address: '{bind}'"))
            })?;
        }
        if self.server.max_body_bytes == 0 || self.server.max_body_bytes > MAX_MAX_BODY_BYTES {
            return Err(ConfigError::Invalid(format!(
                "server.max_body_bytes must be in 1..={MAX_MAX_BODY_BYTES}"
            )));
        }
        let ttl = self.auth.session_ttl_secs;
        if !(MIN_SESSION_TTL_SECS..=MAX_SESSION_TTL_SECS).contains(&ttl) {
            return Err(ConfigError::Invalid(format!(
                "auth.session_ttl_secs must be in {MIN_SESSION_TTL_SECS}..={MAX_SESSION_TTL_SECS}"
            )));
        }
        if let Some(admin) = &self.auth.bootstrap_admin {
            if admin.username.trim().is_empty()
                || admin.email.trim().is_empty()
                || admin.password.is_empty()
            {
                return Err(ConfigError::Invalid(
                    "auth.bootstrap_admin fields must not be blank".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Resolves the config path from the argument, environment, or default name.
fn resolve_path(path: Option<&Path>) -> PathBuf {
    path.map_or_else(
        || {
            env::var(CONFIG_ENV_VAR)
                .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_NAME), PathBuf::from)
        },
        Path::to_path_buf,
    )
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the config file failed.
    #[error("failed to read config {0}: {1}")]
    Read(PathBuf, String),
    /// The config file exceeds the size limit.
    #[error("config {0} too large: {1} bytes")]
    TooLarge(PathBuf, u64),
    /// Parsing the config file failed.
    #[error("failed to parse config {0}: {1}")]
    Parse(PathBuf, String),
    /// A configured value violates its bounds.
    #[error("invalid config: {0}")]
    Invalid(String),
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

    use std::io::Write as _;

    use super::ConfigError;
    use super::SelectConfig;

    #[test]
    fn defaults_validate() {
        SelectConfig::default().validate().unwrap();
    }

    #[test]
    fn bad_bind_address_is_rejected() {
        let config: SelectConfig =
            toml::from_str("[server]\nbind = \"not-an-address\"\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn out_of_bounds_session_ttl_is_rejected() {
        let config: SelectConfig = toml::from_str("[auth]\nsession_ttl_secs = 5\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<SelectConfig, _> = toml::from_str("[server]\nunknown = true\n");
        assert!(result.is_err());
    }

    #[test]
    fn load_reads_a_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nbind = \"127.0.0.1:0\"").unwrap();
        let config = SelectConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.server.bind.as_deref(), Some("127.0.0.1:0"));
    }

    #[test]
    fn load_surfaces_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(SelectConfig::load(Some(&missing)), Err(ConfigError::Read(_, _))));
    }

    #[test]
    fn blank_bootstrap_admin_is_rejected() {
        let config: SelectConfig = toml::from_str(
            "[auth.bootstrap_admin]\nusername = \"\"\nemail = \"a@b\"\npassword = \"x\"\n",
        )
        .unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
