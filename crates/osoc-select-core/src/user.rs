// osoc-select-core/src/user.rs
// ============================================================================
// Module: User Accounts
// Description: User entity, role permissions, and the account service.
// Purpose: Provide registration, role management, and credential checks.
// Dependencies: serde, crate::hashing
// ============================================================================

//! ## Overview
//! A [`User`] carries a [`Role`] that gates what the account may do. Roles
//! form a strict permission ladder: `Admin > Coach > Disabled`. Registration
//! is open but always produces a `Disabled` account; an admin must promote
//! it before the account can do anything. Passwords are stored as SHA-256
//! fingerprints and never serialized.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use serde::Deserialize;
use serde::Serialize;

use crate::error::CoreError;
use crate::hashing::fingerprint;
use crate::identifiers::UserId;

// ============================================================================
// SECTION: Roles
// ============================================================================

/// Account permission level. Variant order defines the permission ladder,
/// lowest first, so `Ord` compares permission levels directly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Role {
    /// Registered but not yet enabled by an admin.
    #[default]
    Disabled,
    /// May read and make status suggestions.
    Coach,
    /// Full control, including role changes and edition management.
    Admin,
}

impl Role {
    /// Returns true when this role has at least the permission level of
    /// `minimum`.
    #[must_use]
    pub fn has_permission_level(self, minimum: Self) -> bool {
        self >= minimum
    }
}

// ============================================================================
// SECTION: Entity
// ============================================================================

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Account identifier.
    pub id: UserId,
    /// Display name.
    pub username: String,
    /// Unique email address used to log in.
    pub email: String,
    /// Permission level.
    pub role: Role,
    /// SHA-256 fingerprint of the password. Never serialized.
    #[serde(skip)]
    pub password_hash: String,
}

/// Input for registering a new account.
#[derive(Debug, Clone, Deserialize)]
pub struct UserDraft {
    /// Display name.
    pub username: String,
    /// Email address; must be unique.
    pub email: String,
    /// Plaintext password, fingerprinted before storage.
    pub password: String,
}

// ============================================================================
// SECTION: Service Trait
// ============================================================================

/// Account operations.
pub trait UserService: Send + Sync {
    /// Registers a new account. The new account always starts `Disabled`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Conflict`] when the email is already registered
    /// and [`CoreError::Validation`] when a required field is blank.
    fn register(&self, draft: UserDraft) -> Result<User, CoreError>;

    /// Returns the account with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidId`] when no such account exists.
    fn get_by_id(&self, id: &UserId) -> Result<User, CoreError>;

    /// Lists all accounts ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Internal`] when the store is unavailable.
    fn list(&self) -> Result<Vec<User>, CoreError>;

    /// Deletes the account with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidId`] when no such account exists.
    fn delete(&self, id: &UserId) -> Result<(), CoreError>;

    /// Changes the role of the given account.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ForbiddenOperation`] when the change would
    /// demote the last remaining admin.
    fn set_role(&self, id: &UserId, role: Role) -> Result<(), CoreError>;

    /// Checks credentials and returns the matching account.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ForbiddenOperation`] when the credentials do
    /// not match any account.
    fn authenticate(&self, email: &str, password: &str) -> Result<User, CoreError>;
}

// ============================================================================
// SECTION: In-Memory Service
// ============================================================================

/// In-memory account service.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserService {
    /// Account map protected by a mutex.
    users: Arc<Mutex<BTreeMap<UserId, User>>>,
}

impl InMemoryUserService {
    /// Creates an empty account service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an account directly, bypassing the `Disabled` default. Used
    /// to seed the bootstrap admin and test fixtures.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Conflict`] when the email is already registered.
    pub fn insert_with_role(
        &self,
        draft: UserDraft,
        role: Role,
    ) -> Result<User, CoreError> {
        let mut guard = self.lock()?;
        if guard.values().any(|user| user.email == draft.email) {
            return Err(CoreError::Conflict(format!(
                "user with email '{}' already exists",
                draft.email
            )));
        }
        let user = User {
            id: UserId::random(),
            username: draft.username,
            email: draft.email,
            role,
            password_hash: fingerprint(draft.password.as_bytes()),
        };
        guard.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    /// Locks the account map, surfacing poisoning as an internal error.
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<UserId, User>>, CoreError> {
        self.users
            .lock()
            .map_err(|_| CoreError::Internal("user store mutex poisoned".to_string()))
    }
}

impl UserService for InMemoryUserService {
    fn register(&self, draft: UserDraft) -> Result<User, CoreError> {
        if draft.username.trim().is_empty() || draft.email.trim().is_empty() {
            return Err(CoreError::Validation("username and email must not be blank".to_string()));
        }
        if draft.password.is_empty() {
            return Err(CoreError::Validation("password must not be empty".to_string()));
        }
        self.insert_with_role(draft, Role::Disabled)
    }

    fn get_by_id(&self, id: &UserId) -> Result<User, CoreError> {
        self.lock()?
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::InvalidId(format!("user '{id}' does not exist")))
    }

    fn list(&self) -> Result<Vec<User>, CoreError> {
        Ok(self.lock()?.values().cloned().collect())
    }

    fn delete(&self, id: &UserId) -> Result<(), CoreError> {
        let mut guard = self.lock()?;
        if guard.remove(id).is_none() {
            return Err(CoreError::InvalidId(format!("user '{id}' does not exist")));
        }
        Ok(())
    }

    fn set_role(&self, id: &UserId, role: Role) -> Result<(), CoreError> {
        let mut guard = self.lock()?;
        let current = guard
            .get(id)
            .ok_or_else(|| CoreError::InvalidId(format!("user '{id}' does not exist")))?
            .role;
        if current == Role::Admin && role != Role::Admin {
            let admins = guard.values().filter(|user| user.role == Role::Admin).count();
            if admins == 1 {
                return Err(CoreError::ForbiddenOperation(
                    "cannot demote last remaining admin".to_string(),
                ));
            }
        }
        if let Some(user) = guard.get_mut(id) {
            user.role = role;
        }
        Ok(())
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<User, CoreError> {
        let hash = fingerprint(password.as_bytes());
        self.lock()?
            .values()
            .find(|user| user.email == email && user.password_hash == hash)
            .cloned()
            .ok_or_else(|| CoreError::ForbiddenOperation("invalid credentials".to_string()))
    }
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

    use super::InMemoryUserService;
    use super::Role;
    use super::UserDraft;
    use super::UserService;
    use crate::error::CoreError;

    fn draft(email: &str) -> UserDraft {
        UserDraft {
            username: "coach".to_string(),
            email: email.to_string(),
            password: "hunter2".to_string(),
        }
    }

    #[test]
    fn registration_yields_disabled_accounts() {
        let service = InMemoryUserService::new();
        let user = service.register(draft("a@osoc.be")).unwrap();
        assert_eq!(user.role, Role::Disabled);
    }

    #[test]
    fn duplicate_email_is_a_conflict() {
        let service = InMemoryUserService::new();
        service.register(draft("a@osoc.be")).unwrap();
        let err = service.register(draft("a@osoc.be")).unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[test]
    fn last_admin_cannot_be_demoted() {
        let service = InMemoryUserService::new();
        let admin = service.insert_with_role(draft("admin@osoc.be"), Role::Admin).unwrap();
        let err = service.set_role(&admin.id, Role::Coach).unwrap_err();
        assert!(matches!(err, CoreError::ForbiddenOperation(_)));
    }

    #[test]
    fn second_admin_unblocks_demotion() {
        let service = InMemoryUserService::new();
        let first = service.insert_with_role(draft("one@osoc.be"), Role::Admin).unwrap();
        service.insert_with_role(draft("two@osoc.be"), Role::Admin).unwrap();
        service.set_role(&first.id, Role::Coach).unwrap();
        assert_eq!(service.get_by_id(&first.id).unwrap().role, Role::Coach);
    }

    #[test]
    fn authenticate_checks_fingerprints() {
        let service = InMemoryUserService::new();
        service.register(draft("a@osoc.be")).unwrap();
        assert!(service.authenticate("a@osoc.be", "hunter2").is_ok());
        assert!(service.authenticate("a@osoc.be", "wrong").is_err());
    }

    #[test]
    fn roles_order_as_a_permission_ladder() {
        assert!(Role::Admin.has_permission_level(Role::Coach));
        assert!(Role::Coach.has_permission_level(Role::Coach));
        assert!(!Role::Disabled.has_permission_level(Role::Coach));
    }
}
