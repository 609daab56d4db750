// osoc-select-web/src/controllers/students.rs
// ============================================================================
// Module: Student Controller
// Description: Student pipeline endpoints.
// Purpose: Expose student CRUD, status decisions, and coach suggestions.
// Dependencies: osoc-select-core, axum
// ============================================================================

//! ## Overview
//! Listing defaults to the active edition when no `edition` query parameter
//! is given. Status decisions are admin-only; suggestions belong to the
//! authenticated coach. When no security filter is interposed (the unsecured
//! slice), the suggester may be supplied in the request body instead.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::Extension;
use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::routing::post;
use osoc_select_core::EditionName;
use osoc_select_core::Role;
use osoc_select_core::StatusEnum;
use osoc_select_core::StatusSuggestion;
use osoc_select_core::Student;
use osoc_select_core::StudentDraft;
use osoc_select_core::StudentId;
use osoc_select_core::SuggestionEnum;
use osoc_select_core::UserId;
use serde::Deserialize;

use crate::app::AppState;
use crate::error::ApiError;
use crate::registry::Route;
use crate::security::AuthContext;
use crate::security::require_admin_or_self;
use crate::security::require_role;

// ============================================================================
// SECTION: Routes
// ============================================================================

/// Route table for the student controller.
pub static ROUTES: &[Route] = &[
    Route {
        method: "GET",
        path: "/students",
    },
    Route {
        method: "POST",
        path: "/students",
    },
    Route {
        method: "GET",
        path: "/students/{student_id}",
    },
    Route {
        method: "DELETE",
        path: "/students/{student_id}",
    },
    Route {
        method: "POST",
        path: "/students/{student_id}/status",
    },
    Route {
        method: "POST",
        path: "/students/{student_id}/suggestions",
    },
    Route {
        method: "DELETE",
        path: "/students/{student_id}/suggestions/{coach_id}",
    },
];

/// Mounts the student controller.
#[must_use]
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route("/students/{student_id}", get(get_student).delete(delete_student))
        .route("/students/{student_id}/status", post(set_status))
        .route("/students/{student_id}/suggestions", post(add_suggestion))
        .route(
            "/students/{student_id}/suggestions/{coach_id}",
            axum::routing::delete(delete_suggestion),
        )
}

// ============================================================================
// SECTION: Payloads
// ============================================================================

/// Query parameters for the student list.
#[derive(Debug, Deserialize)]
struct StudentListQuery {
    /// Edition to list; defaults to the active edition.
    edition: Option<String>,
}

/// Status decision body.
#[derive(Debug, Deserialize)]
struct StatusRequest {
    /// The decided status.
    status: StatusEnum,
}

/// Suggestion body.
#[derive(Debug, Deserialize)]
struct SuggestionRequest {
    /// The suggested status.
    suggestion: SuggestionEnum,
    /// Why the coach suggests it.
    motivation: String,
    /// Suggesting coach; only honored when no security filter is
    /// interposed, otherwise the authenticated account wins.
    suggester: Option<UserId>,
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Lists students in the requested or active edition.
async fn list_students(
    State(state): State<AppState>,
    Query(query): Query<StudentListQuery>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let edition = match query.edition {
        Some(name) => EditionName::new(name),
        None => state
            .services
            .editions
            .get_active()?
            .map(|edition| edition.name)
            .ok_or_else(|| ApiError::bad_request("no edition given and none active"))?,
    };
    Ok(Json(state.services.students.list(&edition)?))
}

/// Creates a student in an active edition.
async fn create_student(
    State(state): State<AppState>,
    Json(draft): Json<StudentDraft>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    let student = state.services.students.create(draft)?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// Returns one student.
async fn get_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<Student>, ApiError> {
    Ok(Json(state.services.students.get_by_id(&StudentId::new(student_id))?))
}

/// Deletes one student. Admin-only.
async fn delete_student(
    State(state): State<AppState>,
    auth: Option<Extension<AuthContext>>,
    Path(student_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    require_role(auth.as_deref(), Role::Admin)?;
    state.services.students.delete(&StudentId::new(student_id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Sets the decision status. Admin-only.
async fn set_status(
    State(state): State<AppState>,
    auth: Option<Extension<AuthContext>>,
    Path(student_id): Path<String>,
    Json(request): Json<StatusRequest>,
) -> Result<StatusCode, ApiError> {
    require_role(auth.as_deref(), Role::Admin)?;
    state.services.students.set_status(&StudentId::new(student_id), request.status)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Attaches the caller's suggestion to a student.
async fn add_suggestion(
    State(state): State<AppState>,
    auth: Option<Extension<AuthContext>>,
    Path(student_id): Path<String>,
    Json(request): Json<SuggestionRequest>,
) -> Result<(StatusCode, Json<StatusSuggestion>), ApiError> {
    let suggester = match (&auth, request.suggester) {
        (Some(Extension(context)), _) => context.user_id.clone(),
        (None, Some(suggester)) => suggester,
        (None, None) => return Err(ApiError::bad_request("suggester required")),
    };
    let suggestion = state.services.students.add_suggestion(
        &StudentId::new(student_id),
        suggester,
        request.suggestion,
        request.motivation,
    )?;
    Ok((StatusCode::CREATED, Json(suggestion)))
}

/// Removes a coach's suggestion. Admins may remove anyone's; coaches only
/// their own.
async fn delete_suggestion(
    State(state): State<AppState>,
    auth: Option<Extension<AuthContext>>,
    Path((student_id, coach_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let coach = UserId::new(coach_id);
    require_admin_or_self(auth.as_deref(), &coach)?;
    state.services.students.delete_suggestion(&StudentId::new(student_id), &coach)?;
    Ok(StatusCode::NO_CONTENT)
}
