// osoc-select-core/src/student.rs
// ============================================================================
// Module: Students and Status Suggestions
// Description: Student entity, status suggestions, and their services.
// Purpose: Track applicants through the selection pipeline.
// Dependencies: serde, crate::edition
// ============================================================================

//! ## Overview
//! A [`Student`] moves through the pipeline via a [`StatusEnum`] decided by
//! admins, and coaches attach [`StatusSuggestion`]s to steer that decision.
//! A coach may hold at most one suggestion per student; suggesting
//! `Undecided` is impossible by construction because [`SuggestionEnum`] has
//! no such variant. Write operations require the student's edition to be
//! active.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use serde::Deserialize;
use serde::Serialize;

use crate::edition::EditionService;
use crate::error::CoreError;
use crate::identifiers::EditionName;
use crate::identifiers::StudentId;
use crate::identifiers::SuggestionId;
use crate::identifiers::UserId;

// ============================================================================
// SECTION: Status Types
// ============================================================================

/// Final decision status of a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StatusEnum {
    /// Promising and a project is available.
    Yes,
    /// Promising but a project may not be available.
    Maybe,
    /// Not promising.
    No,
    /// No decision has been made yet.
    #[default]
    Undecided,
}

/// A coach's suggested decision. `Undecided` is deliberately absent: it is
/// not allowed to suggest leaving a student undecided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuggestionEnum {
    /// Suggests taking the student.
    Yes,
    /// Suggests taking the student if a project can be found.
    Maybe,
    /// Suggests not taking the student.
    No,
}

/// A coach's status suggestion for one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSuggestion {
    /// Suggestion identifier.
    pub id: SuggestionId,
    /// The coach who made the suggestion.
    pub suggester: UserId,
    /// The suggested status.
    pub suggestion: SuggestionEnum,
    /// Why the coach suggests it.
    pub motivation: String,
    /// Edition the suggestion belongs to.
    pub edition: EditionName,
}

// ============================================================================
// SECTION: Entity
// ============================================================================

/// An applicant in the selection pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Student identifier.
    pub id: StudentId,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Declared skills.
    pub skills: Vec<String>,
    /// Current decision status.
    pub status: StatusEnum,
    /// Suggestions made by coaches, in insertion order.
    pub suggestions: Vec<StatusSuggestion>,
    /// Edition the student applied to.
    pub edition: EditionName,
}

/// Input for creating a new student.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentDraft {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Declared skills.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Edition the student applies to.
    pub edition: EditionName,
}

// ============================================================================
// SECTION: Service Traits
// ============================================================================

/// Student pipeline operations.
pub trait StudentService: Send + Sync {
    /// Creates a student in an active edition.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ForbiddenOperation`] when the edition is not
    /// active and [`CoreError::Validation`] when a required field is blank.
    fn create(&self, draft: StudentDraft) -> Result<Student, CoreError>;

    /// Returns the student with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidId`] when no such student exists.
    fn get_by_id(&self, id: &StudentId) -> Result<Student, CoreError>;

    /// Lists students in the given edition ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Internal`] when the store is unavailable.
    fn list(&self, edition: &EditionName) -> Result<Vec<Student>, CoreError>;

    /// Deletes the student with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidId`] when no such student exists.
    fn delete(&self, id: &StudentId) -> Result<(), CoreError>;

    /// Sets the decision status of the student.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidId`] when no such student exists.
    fn set_status(&self, id: &StudentId, status: StatusEnum) -> Result<(), CoreError>;

    /// Attaches a coach's suggestion to the student.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Conflict`] when the coach already has a
    /// suggestion for this student and [`CoreError::ForbiddenOperation`]
    /// when the student's edition is inactive.
    fn add_suggestion(
        &self,
        id: &StudentId,
        suggester: UserId,
        suggestion: SuggestionEnum,
        motivation: String,
    ) -> Result<StatusSuggestion, CoreError>;

    /// Removes the suggestion the given coach made for the student.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Conflict`] when the coach has no suggestion
    /// for this student.
    fn delete_suggestion(&self, id: &StudentId, suggester: &UserId) -> Result<(), CoreError>;
}

/// Lookup of individual suggestions, used by the suggestion controller.
pub trait StatusSuggestionService: Send + Sync {
    /// Returns the suggestion with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidId`] when no such suggestion exists.
    fn get_by_id(&self, id: &SuggestionId) -> Result<StatusSuggestion, CoreError>;
}

// ============================================================================
// SECTION: In-Memory Service
// ============================================================================

/// In-memory student service. Also serves suggestion lookups, since
/// suggestions live on their students.
#[derive(Clone)]
pub struct InMemoryStudentService {
    /// Student map protected by a mutex.
    students: Arc<Mutex<BTreeMap<StudentId, Student>>>,
    /// Edition service consulted for the active-edition write gate.
    editions: Arc<dyn EditionService>,
}

impl InMemoryStudentService {
    /// Creates an empty student service gated by the given edition service.
    #[must_use]
    pub fn new(editions: Arc<dyn EditionService>) -> Self {
        Self {
            students: Arc::new(Mutex::new(BTreeMap::new())),
            editions,
        }
    }

    /// Locks the student map, surfacing poisoning as an internal error.
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<StudentId, Student>>, CoreError> {
        self.students
            .lock()
            .map_err(|_| CoreError::Internal("student store mutex poisoned".to_string()))
    }

    /// Rejects writes against inactive editions.
    fn require_active(&self, edition: &EditionName) -> Result<(), CoreError> {
        if self.editions.is_active(edition) {
            Ok(())
        } else {
            Err(CoreError::ForbiddenOperation(format!("edition '{edition}' is not active")))
        }
    }
}

impl StudentService for InMemoryStudentService {
    fn create(&self, draft: StudentDraft) -> Result<Student, CoreError> {
        if draft.first_name.trim().is_empty() || draft.last_name.trim().is_empty() {
            return Err(CoreError::Validation("student name must not be blank".to_string()));
        }
        self.require_active(&draft.edition)?;
        let student = Student {
            id: StudentId::random(),
            first_name: draft.first_name,
            last_name: draft.last_name,
            skills: draft.skills,
            status: StatusEnum::Undecided,
            suggestions: Vec::new(),
            edition: draft.edition,
        };
        self.lock()?.insert(student.id.clone(), student.clone());
        Ok(student)
    }

    fn get_by_id(&self, id: &StudentId) -> Result<Student, CoreError> {
        self.lock()?
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::InvalidId(format!("student '{id}' does not exist")))
    }

    fn list(&self, edition: &EditionName) -> Result<Vec<Student>, CoreError> {
        Ok(self
            .lock()?
            .values()
            .filter(|student| &student.edition == edition)
            .cloned()
            .collect())
    }

    fn delete(&self, id: &StudentId) -> Result<(), CoreError> {
        let mut guard = self.lock()?;
        if guard.remove(id).is_none() {
            return Err(CoreError::InvalidId(format!("student '{id}' does not exist")));
        }
        Ok(())
    }

    fn set_status(&self, id: &StudentId, status: StatusEnum) -> Result<(), CoreError> {
        let mut guard = self.lock()?;
        let student = guard
            .get_mut(id)
            .ok_or_else(|| CoreError::InvalidId(format!("student '{id}' does not exist")))?;
        student.status = status;
        Ok(())
    }

    fn add_suggestion(
        &self,
        id: &StudentId,
        suggester: UserId,
        suggestion: SuggestionEnum,
        motivation: String,
    ) -> Result<StatusSuggestion, CoreError> {
        let mut guard = self.lock()?;
        let student = guard
            .get_mut(id)
            .ok_or_else(|| CoreError::InvalidId(format!("student '{id}' does not exist")))?;
        if !self.editions.is_active(&student.edition) {
            return Err(CoreError::ForbiddenOperation(format!(
                "edition '{}' is not active",
                student.edition
            )));
        }
        if student.suggestions.iter().any(|existing| existing.suggester == suggester) {
            return Err(CoreError::Conflict(
                "this coach has already made a suggestion for this student".to_string(),
            ));
        }
        let record = StatusSuggestion {
            id: SuggestionId::random(),
            suggester,
            suggestion,
            motivation,
            edition: student.edition.clone(),
        };
        student.suggestions.push(record.clone());
        Ok(record)
    }

    fn delete_suggestion(&self, id: &StudentId, suggester: &UserId) -> Result<(), CoreError> {
        let mut guard = self.lock()?;
        let student = guard
            .get_mut(id)
            .ok_or_else(|| CoreError::InvalidId(format!("student '{id}' does not exist")))?;
        let before = student.suggestions.len();
        student.suggestions.retain(|existing| &existing.suggester != suggester);
        if student.suggestions.len() == before {
            return Err(CoreError::Conflict(
                "this coach has not made a suggestion for the given student".to_string(),
            ));
        }
        Ok(())
    }
}

impl StatusSuggestionService for InMemoryStudentService {
    fn get_by_id(&self, id: &SuggestionId) -> Result<StatusSuggestion, CoreError> {
        self.lock()?
            .values()
            .flat_map(|student| student.suggestions.iter())
            .find(|suggestion| &suggestion.id == id)
            .cloned()
            .ok_or_else(|| CoreError::InvalidId(format!("status suggestion '{id}' does not exist")))
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

    use std::sync::Arc;

    use super::InMemoryStudentService;
    use super::StatusEnum;
    use super::StatusSuggestionService;
    use super::StudentDraft;
    use super::StudentService;
    use super::SuggestionEnum;
    use crate::edition::EditionService;
    use crate::edition::InMemoryEditionService;
    use crate::error::CoreError;
    use crate::identifiers::EditionName;
    use crate::identifiers::UserId;

    fn service_with_active_edition() -> InMemoryStudentService {
        let editions = Arc::new(InMemoryEditionService::new());
        editions.activate(EditionName::new("osoc2022")).unwrap();
        InMemoryStudentService::new(editions)
    }

    fn draft() -> StudentDraft {
        StudentDraft {
            first_name: "Lars".to_string(),
            last_name: "Van Cauter".to_string(),
            skills: vec!["backend".to_string()],
            edition: EditionName::new("osoc2022"),
        }
    }

    #[test]
    fn created_students_start_undecided() {
        let service = service_with_active_edition();
        let student = service.create(draft()).unwrap();
        assert_eq!(student.status, StatusEnum::Undecided);
        assert!(student.suggestions.is_empty());
    }

    #[test]
    fn writes_to_inactive_editions_are_forbidden() {
        let editions = Arc::new(InMemoryEditionService::new());
        let service = InMemoryStudentService::new(editions);
        let err = service.create(draft()).unwrap_err();
        assert!(matches!(err, CoreError::ForbiddenOperation(_)));
    }

    #[test]
    fn one_suggestion_per_coach_per_student() {
        let service = service_with_active_edition();
        let student = service.create(draft()).unwrap();
        let coach = UserId::random();
        service
            .add_suggestion(&student.id, coach.clone(), SuggestionEnum::Yes, "strong".to_string())
            .unwrap();
        let err = service
            .add_suggestion(&student.id, coach, SuggestionEnum::No, "changed".to_string())
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[test]
    fn suggestions_resolve_by_id() {
        let service = service_with_active_edition();
        let student = service.create(draft()).unwrap();
        let added = service
            .add_suggestion(&student.id, UserId::random(), SuggestionEnum::Maybe, "ok".to_string())
            .unwrap();
        let found = StatusSuggestionService::get_by_id(&service, &added.id).unwrap();
        assert_eq!(found, added);
    }

    #[test]
    fn deleting_absent_suggestion_is_a_conflict() {
        let service = service_with_active_edition();
        let student = service.create(draft()).unwrap();
        let err = service.delete_suggestion(&student.id, &UserId::random()).unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[test]
    fn list_filters_by_edition() {
        let service = service_with_active_edition();
        service.create(draft()).unwrap();
        assert_eq!(service.list(&EditionName::new("osoc2022")).unwrap().len(), 1);
        assert!(service.list(&EditionName::new("osoc2021")).unwrap().is_empty());
    }
}
