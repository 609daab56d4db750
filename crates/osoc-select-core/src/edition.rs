// osoc-select-core/src/edition.rs
// ============================================================================
// Module: Editions
// Description: Edition entity and lifecycle service.
// Purpose: Track selection editions and enforce the single-active invariant.
// Dependencies: serde, thiserror (via crate::error)
// ============================================================================

//! ## Overview
//! An edition is one yearly run of the selection process, keyed by name.
//! At most one edition is active at any time; activating an edition
//! deactivates the previous one. Students and suggestions belong to an
//! edition, and write operations on them are rejected when their edition is
//! inactive.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use serde::Deserialize;
use serde::Serialize;

use crate::error::CoreError;
use crate::identifiers::EditionName;

// ============================================================================
// SECTION: Entity
// ============================================================================

/// One yearly run of the selection process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edition {
    /// Unique edition name.
    pub name: EditionName,
    /// Whether this edition currently accepts writes.
    pub active: bool,
}

// ============================================================================
// SECTION: Service Trait
// ============================================================================

/// Edition lifecycle operations.
pub trait EditionService: Send + Sync {
    /// Lists all known editions ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Internal`] when the store is unavailable.
    fn list(&self) -> Result<Vec<Edition>, CoreError>;

    /// Returns the edition with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidId`] when no such edition exists.
    fn get(&self, name: &EditionName) -> Result<Edition, CoreError>;

    /// Returns the currently active edition, if any.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Internal`] when the store is unavailable.
    fn get_active(&self) -> Result<Option<Edition>, CoreError>;

    /// Creates an inactive edition.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Conflict`] when the name is already taken.
    fn create(&self, name: EditionName) -> Result<Edition, CoreError>;

    /// Activates the named edition, creating it when missing and
    /// deactivating any previously active edition.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Internal`] when the store is unavailable.
    fn activate(&self, name: EditionName) -> Result<Edition, CoreError>;

    /// Deactivates the named edition.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidId`] when no such edition exists.
    fn deactivate(&self, name: &EditionName) -> Result<(), CoreError>;

    /// Deletes the named edition.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidId`] when no such edition exists.
    fn delete(&self, name: &EditionName) -> Result<(), CoreError>;

    /// Returns true when the named edition exists and is active.
    fn is_active(&self, name: &EditionName) -> bool;
}

// ============================================================================
// SECTION: In-Memory Service
// ============================================================================

/// In-memory edition service. The only storage in scope for this backend.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEditionService {
    /// Edition map protected by a mutex.
    editions: Arc<Mutex<BTreeMap<EditionName, Edition>>>,
}

impl InMemoryEditionService {
    /// Creates an empty edition service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the edition map, surfacing poisoning as an internal error.
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<EditionName, Edition>>, CoreError> {
        self.editions
            .lock()
            .map_err(|_| CoreError::Internal("edition store mutex poisoned".to_string()))
    }
}

impl EditionService for InMemoryEditionService {
    fn list(&self) -> Result<Vec<Edition>, CoreError> {
        Ok(self.lock()?.values().cloned().collect())
    }

    fn get(&self, name: &EditionName) -> Result<Edition, CoreError> {
        self.lock()?
            .get(name)
            .cloned()
            .ok_or_else(|| CoreError::InvalidId(format!("edition '{name}' does not exist")))
    }

    fn get_active(&self) -> Result<Option<Edition>, CoreError> {
        Ok(self.lock()?.values().find(|edition| edition.active).cloned())
    }

    fn create(&self, name: EditionName) -> Result<Edition, CoreError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&name) {
            return Err(CoreError::Conflict(format!("edition '{name}' already exists")));
        }
        let edition = Edition {
            name: name.clone(),
            active: false,
        };
        guard.insert(name, edition.clone());
        Ok(edition)
    }

    fn activate(&self, name: EditionName) -> Result<Edition, CoreError> {
        let mut guard = self.lock()?;
        for edition in guard.values_mut() {
            edition.active = false;
        }
        let edition = guard.entry(name.clone()).or_insert(Edition {
            name,
            active: false,
        });
        edition.active = true;
        Ok(edition.clone())
    }

    fn deactivate(&self, name: &EditionName) -> Result<(), CoreError> {
        let mut guard = self.lock()?;
        let edition = guard
            .get_mut(name)
            .ok_or_else(|| CoreError::InvalidId(format!("edition '{name}' does not exist")))?;
        edition.active = false;
        Ok(())
    }

    fn delete(&self, name: &EditionName) -> Result<(), CoreError> {
        let mut guard = self.lock()?;
        if guard.remove(name).is_none() {
            return Err(CoreError::InvalidId(format!("edition '{name}' does not exist")));
        }
        Ok(())
    }

    fn is_active(&self, name: &EditionName) -> bool {
        self.lock().is_ok_and(|guard| guard.get(name).is_some_and(|edition| edition.active))
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

    use super::EditionService;
    use super::InMemoryEditionService;
    use crate::identifiers::EditionName;

    #[test]
    fn activate_enforces_single_active_edition() {
        let service = InMemoryEditionService::new();
        service.activate(EditionName::new("osoc2021")).unwrap();
        service.activate(EditionName::new("osoc2022")).unwrap();
        let active = service.get_active().unwrap().unwrap();
        assert_eq!(active.name.as_str(), "osoc2022");
        assert!(!service.is_active(&EditionName::new("osoc2021")));
    }

    #[test]
    fn create_rejects_duplicate_names() {
        let service = InMemoryEditionService::new();
        service.create(EditionName::new("osoc2022")).unwrap();
        assert!(service.create(EditionName::new("osoc2022")).is_err());
    }

    #[test]
    fn deactivate_closes_the_edition_without_deleting_it() {
        let service = InMemoryEditionService::new();
        service.activate(EditionName::new("osoc2022")).unwrap();
        service.deactivate(&EditionName::new("osoc2022")).unwrap();
        assert!(!service.is_active(&EditionName::new("osoc2022")));
        assert!(!service.get(&EditionName::new("osoc2022")).unwrap().active);
        assert!(service.get_active().unwrap().is_none());
    }

    #[test]
    fn delete_unknown_edition_is_invalid_id() {
        let service = InMemoryEditionService::new();
        let err = service.delete(&EditionName::new("missing")).unwrap_err();
        assert!(matches!(err, crate::error::CoreError::InvalidId(_)));
    }
}
