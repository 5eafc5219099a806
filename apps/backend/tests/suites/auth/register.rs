// POST /api/auth/register

use actix_web::test;
use backend_test_support::unique_helpers::{unique_email, unique_username};
use marquee_backend::repos::users;
use serde_json::{json, Value};

use crate::common::assert_problem;
use crate::support::app_builder::create_test_app;
use crate::support::test_state;

#[actix_web::test]
async fn test_register_creates_user_account() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state();
    let app = create_test_app(state.clone()).await;
    let email = unique_email("reg");

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "username": unique_username("reg"),
            "email": email,
            "password": "secret1",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 201);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], false);
    assert_eq!(body["message"], "User registered successfully");

    let stored = users::find_user_by_email(state.store.as_ref(), &email)
        .await?
        .expect("user stored");
    assert_eq!(stored.role.as_str(), "user");
    assert!(stored.password_hash.starts_with("$argon2"));
    assert_ne!(stored.password_hash, "secret1");
    Ok(())
}

#[actix_web::test]
async fn test_register_accepts_admin_role() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state();
    let app = create_test_app(state.clone()).await;
    let email = unique_email("admin");

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "username": unique_username("admin"),
            "email": email,
            "password": "secret1",
            "role": "admin",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);

    let stored = users::find_user_by_email(state.store.as_ref(), &email)
        .await?
        .expect("user stored");
    assert_eq!(stored.role.as_str(), "admin");
    Ok(())
}

#[actix_web::test]
async fn test_register_validation_messages() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(test_state()).await;

    let cases = [
        (
            json!({"email": "a@b.co", "password": "secret1"}),
            "User name is required",
        ),
        (
            json!({"username": "ab", "email": "a@b.co", "password": "secret1"}),
            "User name must be between 3 to 255 characters long",
        ),
        (
            json!({"username": "two words", "email": "a@b.co", "password": "secret1"}),
            "Username must not contain spaces",
        ),
        (
            json!({"username": "alice", "email": "nope", "password": "secret1"}),
            "Invalid email format",
        ),
        (
            json!({"username": "alice", "email": "a@b.co", "password": "123"}),
            "Password must be at least 6 characters long",
        ),
        (
            json!({"username": "alice", "email": "a@b.co", "password": "secret1", "role": "owner"}),
            "Role must be either \"admin\" or \"user\"",
        ),
        (
            json!({"username": "alice", "email": "a@b.co", "password": "secret1", "role": "administrator"}),
            "Role must be at most 10 characters long",
        ),
    ];

    for (body, message) in cases {
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem(resp, 400, "VALIDATION_ERROR", Some(message)).await;
    }
    Ok(())
}

#[actix_web::test]
async fn test_register_duplicates_conflict() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(test_state()).await;
    let username = unique_username("dup");
    let email = unique_email("dup");

    let register = |username: String, email: String| {
        test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "username": username,
                "email": email,
                "password": "secret1",
            }))
            .to_request()
    };

    let resp = test::call_service(&app, register(username.clone(), email.clone())).await;
    assert_eq!(resp.status().as_u16(), 201);

    // Email is checked first even when both collide
    let resp = test::call_service(&app, register(username.clone(), email.clone())).await;
    assert_problem(resp, 409, "UNIQUE_EMAIL", Some("Email is already registered.")).await;

    let resp = test::call_service(&app, register(username, unique_email("other"))).await;
    assert_problem(resp, 409, "UNIQUE_USERNAME", Some("Username is already taken.")).await;
    Ok(())
}

#[actix_web::test]
async fn test_register_rejects_malformed_json() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(test_state()).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem(resp, 400, "BAD_REQUEST", None).await;
    Ok(())
}
