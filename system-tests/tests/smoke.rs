// system-tests/tests/smoke.rs
// ============================================================================
// Module: Smoke Suite
// Description: End-to-end happy path through the secured server.
// Purpose: Prove the full stack works over a real listener.
// Dependencies: helpers, reqwest, serde_json, tokio
// ============================================================================

//! End-to-end happy path through the secured server.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only panic-based assertions."
)]

mod helpers;

use helpers::ADMIN_CONFIG;
use helpers::login_admin;
use helpers::spawn_server;
use serde_json::Value;
use serde_json::json;

#[tokio::test]
async fn admin_can_run_a_selection_round_end_to_end() {
    let server = spawn_server(ADMIN_CONFIG).await.unwrap();
    let token = login_admin(&server).await.unwrap();
    let client = reqwest::Client::new();
    let base = server.base_url();

    // Open an edition.
    let activated = client
        .post(format!("{base}/editions/osoc2022/activate"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(activated.status(), 200);

    // A student applies.
    let student: Value = client
        .post(format!("{base}/students"))
        .bearer_auth(&token)
        .json(&json!({
            "first_name": "Sofie",
            "last_name": "Mertens",
            "skills": ["design"],
            "edition": "osoc2022",
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let student_id = student["id"].as_str().unwrap();
    assert_eq!(student["status"], "Undecided");

    // The admin suggests, then decides.
    let suggested = client
        .post(format!("{base}/students/{student_id}/suggestions"))
        .bearer_auth(&token)
        .json(&json!({ "suggestion": "Yes", "motivation": "Excellent screening call." }))
        .send()
        .await
        .unwrap();
    assert_eq!(suggested.status(), 201);

    let decided = client
        .post(format!("{base}/students/{student_id}/status"))
        .bearer_auth(&token)
        .json(&json!({ "status": "Yes" }))
        .send()
        .await
        .unwrap();
    assert_eq!(decided.status(), 204);

    // The listing reflects both.
    let listed: Value = client
        .get(format!("{base}/students"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed[0]["status"], "Yes");
    assert_eq!(listed[0]["suggestions"][0]["suggestion"], "Yes");

    server.shutdown().await;
}
