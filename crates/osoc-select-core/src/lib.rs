// osoc-select-core/src/lib.rs
// ============================================================================
// Module: OSOC Select Core Library
// Description: Domain model and services for the OSOC selection backend.
// Purpose: Provide entities, identifiers, and in-memory service implementations.
// Dependencies: serde, sha2, thiserror
// ============================================================================

//! ## Overview
//! This crate holds the selection-tool domain: students and their status
//! suggestions, editions, and user accounts with role-based permissions.
//! Services are exposed as object-safe traits so the web layer and the test
//! harness can swap implementations; the in-memory implementations provided
//! here are the only storage in scope.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod edition;
pub mod error;
pub mod hashing;
pub mod identifiers;
pub mod student;
pub mod user;

#[cfg(test)]
mod tests {
    //! Test-only lint relaxations for panic-based assertions and debug output.
    #![allow(
        clippy::panic,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::use_debug,
        clippy::dbg_macro,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        reason = "Test-only output and panic-based assertions are permitted."
    )]
}

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use edition::Edition;
pub use edition::EditionService;
pub use edition::InMemoryEditionService;
pub use error::CoreError;
pub use hashing::fingerprint;
pub use identifiers::EditionName;
pub use identifiers::StudentId;
pub use identifiers::SuggestionId;
pub use identifiers::UserId;
pub use student::InMemoryStudentService;
pub use student::StatusEnum;
pub use student::StatusSuggestion;
pub use student::StatusSuggestionService;
pub use student::Student;
pub use student::StudentDraft;
pub use student::StudentService;
pub use student::SuggestionEnum;
pub use user::InMemoryUserService;
pub use user::Role;
pub use user::User;
pub use user::UserDraft;
pub use user::UserService;
