// osoc-select-webtest/tests/slice_dispatch.rs
// ============================================================================
// Module: Slice Dispatch Tests
// Description: HTTP-level checks of slice mounting and filter exclusion.
// Purpose: Verify restriction, alias, and unsecured dispatch over real HTTP.
// Dependencies: osoc-select-webtest, osoc-select-web, reqwest, tokio
// ============================================================================

//! HTTP-level checks of slice mounting and filter exclusion.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only panic-based assertions."
)]

use osoc_select_core::EditionName;
use osoc_select_core::StudentDraft;
use osoc_select_web::AppState;
use osoc_select_web::SecurityPosture;
use osoc_select_web::build_router;
use osoc_select_web::registry::ControllerSpec;
use osoc_select_web::registry::registry;
use osoc_select_webtest::UnsecuredWebSlice;
use osoc_select_webtest::harness::serve_router;

/// Seeds an active edition and one student, returning the student id.
fn seed_student(state: &AppState) -> String {
    state.services.editions.activate(EditionName::new("osoc2022")).unwrap();
    let student = state
        .services
        .students
        .create(StudentDraft {
            first_name: "Lars".to_string(),
            last_name: "Van Cauter".to_string(),
            skills: vec!["backend".to_string()],
            edition: EditionName::new("osoc2022"),
        })
        .unwrap();
    student.id.as_str().to_string()
}

#[tokio::test]
async fn restricted_slice_serves_only_the_selected_controller() {
    let app = UnsecuredWebSlice::new().controllers(["students"]).build().unwrap();
    seed_student(app.state());
    let server = app.serve().await.unwrap();
    let client = reqwest::Client::new();

    let students = client
        .get(format!("{}/students", server.base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(students.status(), 200);

    let users = client.get(format!("{}/users", server.base_url())).send().await.unwrap();
    assert_eq!(users.status(), 404);

    server.shutdown().await;
}

#[tokio::test]
async fn root_probe_is_mounted_in_every_slice() {
    let app = UnsecuredWebSlice::new().only(["auth"]).build().unwrap();
    let server = app.serve().await.unwrap();

    let response = reqwest::get(server.base_url()).await.unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["service"], "osoc-select");

    server.shutdown().await;
}

#[tokio::test]
async fn unauthenticated_requests_reach_guarded_handlers_in_the_slice() {
    let app = UnsecuredWebSlice::new().controllers(["students"]).build().unwrap();
    let student_id = seed_student(app.state());
    let server = app.serve().await.unwrap();

    // Deletion is admin-only in the secured application. With no filter
    // interposed the handler's guard stands down.
    let response = reqwest::Client::new()
        .delete(format!("{}/students/{student_id}", server.base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);

    server.shutdown().await;
}

#[tokio::test]
async fn the_secured_application_rejects_the_same_request() {
    let state = AppState::in_memory();
    let student_id = seed_student(&state);
    let specs: Vec<&ControllerSpec> = registry().iter().collect();
    let router = build_router(state, &specs, SecurityPosture::Enforced);
    let server = serve_router(router).await.unwrap();

    let response = reqwest::Client::new()
        .delete(format!("{}/students/{student_id}", server.base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    server.shutdown().await;
}
