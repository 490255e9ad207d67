mod common;

use anyhow::Result;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;

use common::{TestApp, TOKEN_HEADER};

#[tokio::test]
async fn register_returns_summary_without_password() -> Result<()> {
    let app = TestApp::new();

    let res = app.register("first user", "firstuser@test.com", "firstuser").await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], "first user");
    assert_eq!(res.body["email"], "firstuser@test.com");
    assert!(!res.id().is_empty());
    assert!(res.body.get("password").is_none());
    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_rejected() -> Result<()> {
    let app = TestApp::new();
    app.register("first user", "firstuser@test.com", "firstuser").await?;

    let res = app.register("other user", "firstuser@test.com", "otherpass").await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.message(), "User is already registered");
    assert_eq!(res.body["status"], "Bad Request");

    let res = app.register("other user", "otheruser@test.com", "otherpass").await?;
    assert_eq!(res.status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn registration_validation_failures() -> Result<()> {
    let app = TestApp::new();

    let res = app.register("test user", "test", "test-password").await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["field"], "email");

    let res = app.register("test user", "test@test.com", "te").await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["field"], "password");

    let res = app.register("te", "test@test.com", "test-password").await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["field"], "name");

    let res = app
        .post(
            "/api/users",
            None,
            json!({ "name": "test user", "email": "test@test.com", "password": "test-password", "isAdmin": true }),
        )
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.message(), "\"isAdmin\" is not allowed");
    Ok(())
}

#[tokio::test]
async fn login_sets_token_header() -> Result<()> {
    let app = TestApp::new();
    let registered = app.register("first user", "firstuser@test.com", "firstuser").await?;

    let res = app.login("firstuser@test.com", "firstuser").await?;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.headers.get(TOKEN_HEADER).is_some());
    assert_eq!(res.body, registered.body);
    Ok(())
}

#[tokio::test]
async fn login_failures_distinguish_email_and_password() -> Result<()> {
    let app = TestApp::new();
    app.register("first user", "firstuser@test.com", "firstuser").await?;

    let res = app.login("nobody@test.com", "firstuser").await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.message(), "Invalid email");

    let res = app.login("firstuser@test.com", "wrongpassword").await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.message(), "Invalid password");
    assert!(res.headers.get(TOKEN_HEADER).is_none());
    Ok(())
}

#[tokio::test]
async fn me_returns_profile_of_token_owner() -> Result<()> {
    let app = TestApp::new();
    let token = app.user_token("firstuser@test.com").await?;

    let res = app.get_auth("/api/users/me", &token).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["email"], "firstuser@test.com");
    assert_eq!(res.body["isAdmin"], false);
    assert!(res.body.get("password").is_none());
    Ok(())
}

#[tokio::test]
async fn me_requires_valid_token() -> Result<()> {
    let app = TestApp::new();

    let res = app.get("/api/users/me").await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.message(), "Access Denied. No token provided");
    assert_eq!(res.body["status"], "Unauthorized");

    let res = app.get_auth("/api/users/me", "invalid token").await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.message(), "Invalid token.");
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_rejected() -> Result<()> {
    let app = TestApp::new();

    let request = Request::builder()
        .method("POST")
        .uri("/api/users")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))?;
    let res = app.send_request(request).await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "INVALID_JSON");
    Ok(())
}
