// osoc-select-web/src/sessions.rs
// ============================================================================
// Module: Session Store
// Description: Opaque bearer-token sessions with fingerprint storage.
// Purpose: Issue, resolve, and revoke login sessions without keeping secrets.
// Dependencies: osoc-select-core, rand, time
// ============================================================================

//! ## Overview
//! Logging in issues an opaque random token handed to the client once. The
//! store keeps only the token's SHA-256 fingerprint together with the owning
//! user and an expiry instant; expired entries are dropped on resolution.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Mutex;
use std::time::Duration;

use osoc_select_core::UserId;
use osoc_select_core::fingerprint;
use thiserror::Error;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Session Store
// ============================================================================

/// One live session.
#[derive(Debug, Clone)]
struct Session {
    /// Account the session belongs to.
    user: UserId,
    /// Instant after which the session is invalid.
    expires_at: OffsetDateTime,
}

/// In-memory session store keyed by token fingerprint.
#[derive(Debug)]
pub struct SessionStore {
    /// Fingerprint-to-session map protected by a mutex.
    sessions: Mutex<BTreeMap<String, Session>>,
    /// Lifetime applied to newly issued sessions.
    ttl: Duration,
}

impl SessionStore {
    /// Creates a session store with the given session lifetime.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(BTreeMap::new()),
            ttl,
        }
    }

    /// Issues a fresh session token for the given user. The plaintext token
    /// is returned exactly once; only its fingerprint is retained.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Internal`] when the store is unavailable.
    pub fn issue(&self, user: UserId) -> Result<String, SessionError> {
        let token = random_token();
        let session = Session {
            user,
            expires_at: OffsetDateTime::now_utc() + self.ttl,
        };
        self.lock()?.insert(fingerprint(token.as_bytes()), session);
        Ok(token)
    }

    /// Resolves a presented token to its owning user.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Unknown`] for tokens that were never issued
    /// or already revoked, and [`SessionError::Expired`] for stale ones.
    pub fn resolve(&self, token: &str) -> Result<UserId, SessionError> {
        let key = fingerprint(token.as_bytes());
        let mut guard = self.lock()?;
        let session = guard.get(&key).cloned().ok_or(SessionError::Unknown)?;
        if session.expires_at < OffsetDateTime::now_utc() {
            guard.remove(&key);
            return Err(SessionError::Expired);
        }
        Ok(session.user)
    }

    /// Revokes a presented token. Returns true when a session was removed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Internal`] when the store is unavailable.
    pub fn revoke(&self, token: &str) -> Result<bool, SessionError> {
        Ok(self.lock()?.remove(&fingerprint(token.as_bytes())).is_some())
    }

    /// Locks the session map, surfacing poisoning as an internal error.
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Session>>, SessionError> {
        self.sessions.lock().map_err(|_| SessionError::Internal)
    }
}

/// Produces a 256-bit random token rendered as lowercase hex.
fn random_token() -> String {
    let bytes: [u8; 32] = rand::random();
    let mut out = String::with_capacity(64);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Session resolution errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The token was never issued or has been revoked.
    #[error("unknown session token")]
    Unknown,
    /// The session exists but its lifetime has elapsed.
    #[error("session expired")]
    Expired,
    /// The store is unavailable (poisoned lock).
    #[error("session store unavailable")]
    Internal,
}

// ============================================================================
// SECTION: Tests
// ============================================================================
