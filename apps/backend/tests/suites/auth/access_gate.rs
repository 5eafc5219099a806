// Access gate behavior on a stand-in protected route
//
// The route counts how often it runs, so every rejection can also assert
// that the handler was never reached.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use actix_web::{test, web, HttpResponse};
use marquee_backend::auth::claims::Role;
use marquee_backend::auth::permissions::RouteGroup;
use marquee_backend::extractors::CurrentUser;
use marquee_backend::middleware::access_gate::AccessGate;
use marquee_backend::state::app_state::AppState;

use crate::common::assert_problem;
use crate::support::app_builder::create_test_app_with;
use crate::support::auth::{
    bearer, expired_bearer, refresh_as_bearer, unknown_role_bearer,
};
use crate::support::{test_security, test_state};

fn guarded_routes(
    group: RouteGroup,
    hits: Arc<AtomicUsize>,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(
            web::scope("/guarded").wrap(AccessGate::new(group)).route(
                "",
                web::get().to(move |user: CurrentUser| {
                    let hits = hits.clone();
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        HttpResponse::Ok().json(serde_json::json!({
                            "id": user.id,
                            "role": user.role.as_str(),
                        }))
                    }
                }),
            ),
        );
    }
}

async fn call_guarded(
    state: AppState,
    group: RouteGroup,
    authorization: Option<String>,
) -> (actix_web::dev::ServiceResponse, usize) {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = create_test_app_with(state, guarded_routes(group, hits.clone())).await;

    let mut req = test::TestRequest::get().uri("/guarded");
    if let Some(value) = authorization {
        req = req.insert_header(("Authorization", value));
    }
    let resp = test::call_service(&app, req.to_request()).await;
    (resp, hits.load(Ordering::SeqCst))
}

#[actix_web::test]
async fn test_missing_header_is_401() -> Result<(), Box<dyn std::error::Error>> {
    let (resp, hits) = call_guarded(test_state(), RouteGroup::Catalog, None).await;

    assert_eq!(hits, 0, "handler must not run");
    assert_problem(
        resp,
        401,
        "UNAUTHORIZED_MISSING_BEARER",
        Some("Access denied, token missing"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn test_wrong_scheme_and_empty_token_are_missing() -> Result<(), Box<dyn std::error::Error>>
{
    for value in ["Basic dXNlcjpwYXNz", "Bearer", "Bearer ", "token-without-scheme"] {
        let (resp, hits) =
            call_guarded(test_state(), RouteGroup::Catalog, Some(value.to_string())).await;
        assert_eq!(hits, 0);
        assert_problem(resp, 401, "UNAUTHORIZED_MISSING_BEARER", None).await;
    }
    Ok(())
}

#[actix_web::test]
async fn test_garbage_token_is_403() -> Result<(), Box<dyn std::error::Error>> {
    let (resp, hits) = call_guarded(
        test_state(),
        RouteGroup::Catalog,
        Some("Bearer not.a.jwt".to_string()),
    )
    .await;

    assert_eq!(hits, 0);
    assert_problem(resp, 403, "INVALID_TOKEN", Some("Invalid token")).await;
    Ok(())
}

#[actix_web::test]
async fn test_token_signed_with_other_secret_is_403() -> Result<(), Box<dyn std::error::Error>> {
    let foreign = bearer("u1", Role::User, &test_security());
    let (resp, hits) = call_guarded(test_state(), RouteGroup::Catalog, Some(foreign)).await;

    assert_eq!(hits, 0);
    assert_problem(resp, 403, "INVALID_TOKEN", None).await;
    Ok(())
}

#[actix_web::test]
async fn test_refresh_credential_is_not_an_access_credential(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state();
    let token = refresh_as_bearer("u1", Role::User, &state.security);
    let (resp, hits) = call_guarded(state, RouteGroup::Catalog, Some(token)).await;

    assert_eq!(hits, 0);
    assert_problem(resp, 403, "INVALID_TOKEN", None).await;
    Ok(())
}

#[actix_web::test]
async fn test_expired_token_is_403() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state();
    let token = expired_bearer("u1", Role::User, &state.security);
    let (resp, hits) = call_guarded(state, RouteGroup::Catalog, Some(token)).await;

    assert_eq!(hits, 0);
    assert_problem(resp, 403, "TOKEN_EXPIRED", Some("Token has expired")).await;
    Ok(())
}

#[actix_web::test]
async fn test_unknown_role_is_403() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state();
    let token = unknown_role_bearer("u1", &state.security);
    let (resp, hits) = call_guarded(state, RouteGroup::Catalog, Some(token)).await;

    assert_eq!(hits, 0);
    assert_problem(resp, 403, "INVALID_TOKEN", None).await;
    Ok(())
}

#[actix_web::test]
async fn test_user_role_cannot_enter_moderation() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state();
    let token = bearer("u1", Role::User, &state.security);
    let (resp, hits) = call_guarded(state, RouteGroup::Moderation, Some(token)).await;

    assert_eq!(hits, 0);
    assert_problem(resp, 403, "INSUFFICIENT_ROLE", None).await;
    Ok(())
}

#[actix_web::test]
async fn test_identity_reaches_handler() -> Result<(), Box<dyn std::error::Error>> {
    for (group, role) in [
        (RouteGroup::Catalog, Role::User),
        (RouteGroup::Ratings, Role::User),
        (RouteGroup::Catalog, Role::Admin),
        (RouteGroup::Moderation, Role::Admin),
    ] {
        let state = test_state();
        let token = bearer("subject-42", role, &state.security);
        let (resp, hits) = call_guarded(state, group, Some(token)).await;

        assert_eq!(resp.status().as_u16(), 200, "{group:?} should admit {role:?}");
        assert_eq!(hits, 1);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["id"], "subject-42");
        assert_eq!(body["role"], role.as_str());
    }
    Ok(())
}

#[actix_web::test]
async fn test_scheme_is_case_insensitive() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state();
    let token = bearer("u1", Role::User, &state.security).replacen("Bearer", "bearer", 1);
    let (resp, hits) = call_guarded(state, RouteGroup::Catalog, Some(token)).await;

    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(hits, 1);
    Ok(())
}

#[actix_web::test]
async fn test_rejection_carries_trace_id() -> Result<(), Box<dyn std::error::Error>> {
    let (resp, _) = call_guarded(test_state(), RouteGroup::Catalog, None).await;

    let request_id = resp
        .headers()
        .get("x-request-id")
        .map(|v| v.to_str().unwrap().to_string())
        .expect("x-request-id header");
    let problem = assert_problem(resp, 401, "UNAUTHORIZED_MISSING_BEARER", None).await;
    assert_eq!(problem.trace_id, request_id);
    Ok(())
}
