mod common;

use axum::{
    http::{Method, StatusCode},
    Router,
};
use common::*;
use serde_json::json;

async fn register(app: &Router, email: &str, password: &str) -> TestResponse {
    post(
        app,
        "/api/auth/register",
        json!({ "firstName": "Ada", "lastName": "Lovelace", "email": email, "password": password }),
    )
    .await
}

#[tokio::test]
async fn register_issues_a_token_the_server_accepts() {
    let app = app();

    let res = register(&app, "Ada@Example.com", "analytical").await;
    assert_eq!(res.status, StatusCode::CREATED);
    let body = res.json();
    assert_eq!(body["email"], "ada@example.com");
    let token = body["authtoken"].as_str().unwrap();
    assert!(!token.is_empty());

    let me = send(&app, Method::GET, "/api/auth/me", None, Some(token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.json(), json!({ "userName": "Ada", "userEmail": "ada@example.com" }));
}

#[tokio::test]
async fn register_with_a_used_email_reports_the_server_message() {
    let app = app();
    register(&app, "ada@example.com", "analytical").await;

    let res = register(&app, " ADA@example.com ", "different").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    let body = res.json();
    assert_eq!(body["error"], "Email id already exists");
    assert!(body.get("authtoken").is_none());
}

#[tokio::test]
async fn register_validates_its_input() {
    let app = app();

    let bad_email = register(&app, "not-an-email", "analytical").await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);

    let short_password = register(&app, "ada@example.com", "abc").await;
    assert_eq!(short_password.status, StatusCode::BAD_REQUEST);

    let no_name = post(
        &app,
        "/api/auth/register",
        json!({ "firstName": "", "email": "ada@example.com", "password": "analytical" }),
    )
    .await;
    assert_eq!(no_name.status, StatusCode::BAD_REQUEST);

    let missing_fields =
        post(&app, "/api/auth/register", json!({ "email": "ada@example.com" })).await;
    assert_eq!(missing_fields.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_with_correct_credentials_returns_name_and_email() {
    let app = app();
    register(&app, "ada@example.com", "analytical").await;

    let res = post(
        &app,
        "/api/auth/login",
        json!({ "email": "ADA@example.com", "password": "analytical" }),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert!(!body["authtoken"].as_str().unwrap().is_empty());
    assert_eq!(body["userName"], "Ada");
    assert_eq!(body["userEmail"], "ada@example.com");
}

#[tokio::test]
async fn login_with_wrong_credentials_has_no_token() {
    let app = app();
    register(&app, "ada@example.com", "analytical").await;

    for (email, password) in [
        ("ada@example.com", "wrong-password"),
        ("nobody@example.com", "analytical"),
    ] {
        let res = post(
            &app,
            "/api/auth/login",
            json!({ "email": email, "password": password }),
        )
        .await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
        let body = res.json();
        assert!(body.get("authtoken").is_none());
        assert_eq!(body["error"], "Invalid email or password");
    }
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let app = app();

    let missing = send(&app, Method::GET, "/api/auth/me", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let bogus = send(&app, Method::GET, "/api/auth/me", None, Some("not-a-token")).await;
    assert_eq!(bogus.status, StatusCode::UNAUTHORIZED);
    assert!(bogus.json()["error"].is_string());
}

#[tokio::test]
async fn logout_revokes_the_token() {
    let app = app();
    let token = register(&app, "ada@example.com", "analytical").await.json()["authtoken"]
        .as_str()
        .unwrap()
        .to_string();

    let out = send(&app, Method::POST, "/api/auth/logout", None, Some(&token)).await;
    assert_eq!(out.status, StatusCode::NO_CONTENT);

    let me = send(&app, Method::GET, "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn update_changes_the_name_and_keeps_the_token() {
    let app = app();
    let token = register(&app, "ada@example.com", "analytical").await.json()["authtoken"]
        .as_str()
        .unwrap()
        .to_string();

    let res = send(
        &app,
        Method::PUT,
        "/api/auth/update",
        Some(json!({ "firstName": "Augusta" })),
        Some(&token),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!({ "authtoken": token, "userName": "Augusta" }));

    let me = send(&app, Method::GET, "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.json()["userName"], "Augusta");

    let blank = send(
        &app,
        Method::PUT,
        "/api/auth/update",
        Some(json!({ "firstName": " " })),
        Some(&token),
    )
    .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
}
