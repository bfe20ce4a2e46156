mod common;

use auth::Role;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_sync_creates_replica_row() {
    let app = TestApp::spawn().await;

    let response = app.sync(1, "a@x.com", "Alice", "student").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let token = app.token_for(1, "a@x.com", Role::Student);
    let profile = app
        .get("/api/profiles/me")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(profile.status(), StatusCode::OK);
    let body: serde_json::Value = profile.json().await.unwrap();
    assert_eq!(body["data"]["identity_id"], 1);
    assert_eq!(body["data"]["email"], "a@x.com");
    assert_eq!(body["data"]["display_name"], "Alice");
    assert_eq!(body["data"]["role"], "student");
}

#[tokio::test]
async fn test_sync_is_idempotent_and_overwrites() {
    let app = TestApp::spawn().await;

    app.sync(1, "a@x.com", "Alice", "student").await;
    // Re-delivery with a newer display name overwrites, never duplicates
    let second = app.sync(1, "a@x.com", "Alice Renamed", "student").await;
    assert_eq!(second.status(), StatusCode::NO_CONTENT);

    let admin_token = app.token_for(99, "admin@x.com", Role::Admin);
    let listing = app
        .get("/api/profiles")
        .bearer_auth(&admin_token)
        .send()
        .await
        .expect("Failed to execute request");

    let body: serde_json::Value = listing.json().await.unwrap();
    let profiles = body["data"].as_array().unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0]["display_name"], "Alice Renamed");
}

#[tokio::test]
async fn test_sync_rejects_malformed_payload() {
    let app = TestApp::spawn().await;

    // Unknown role
    let response = app.sync(1, "a@x.com", "Alice", "superuser").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Missing field
    let response = app
        .post("/internal/profiles/sync")
        .json(&json!({ "identity_id": 1, "email": "a@x.com" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Blank display name
    let response = app.sync(1, "a@x.com", "   ", "student").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Nothing was stored
    let token = app.token_for(1, "a@x.com", Role::Student);
    let profile = app
        .get("/api/profiles/me")
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(profile.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_my_profile_requires_token() {
    let app = TestApp::spawn().await;
    app.sync(1, "a@x.com", "Alice", "student").await;

    let missing = app.get("/api/profiles/me").send().await.unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let garbage = app
        .get("/api/profiles/me")
        .bearer_auth("garbage")
        .send()
        .await
        .unwrap();
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_my_profile_before_sync_is_not_found() {
    let app = TestApp::spawn().await;

    // Valid token, but replication has not delivered the row yet: this is
    // the observable eventual-consistency window
    let token = app.token_for(5, "late@x.com", Role::Client);
    let response = app
        .get("/api/profiles/me")
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_listing_distinguishes_forbidden_from_unauthorized() {
    let app = TestApp::spawn().await;
    app.sync(1, "a@x.com", "Alice", "student").await;

    // No credential: 401
    let anonymous = app.get("/api/profiles").send().await.unwrap();
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    // Valid credential, insufficient role: 403
    let student_token = app.token_for(1, "a@x.com", Role::Student);
    let forbidden = app
        .get("/api/profiles")
        .bearer_auth(&student_token)
        .send()
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    // Admin: 200
    let admin_token = app.token_for(99, "admin@x.com", Role::Admin);
    let allowed = app
        .get("/api/profiles")
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(allowed.status(), StatusCode::OK);
}
