// /api/movie/admin/reports/**

use actix_web::test;
use marquee_backend::auth::claims::Role;
use marquee_backend::repos::movies::{self, MovieStatus};
use marquee_backend::repos::reports::{self, ReportStatus};
use serde_json::{json, Value};

use crate::common::assert_problem;
use crate::support::app_builder::create_test_app;
use crate::support::auth::bearer;
use crate::support::factory::{seed_movie, seed_report};
use crate::support::test_state;

#[actix_web::test]
async fn test_admin_lists_reports() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state();
    let movie_id = seed_movie(&state, "owner").await;
    let report = seed_report(&state, &movie_id, "viewer").await;
    let app = create_test_app(state.clone()).await;

    for uri in ["/api/movie/admin/reports", "/api/movie/admin/reports/"] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(("Authorization", bearer("admin", Role::Admin, &state.security)))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let listed = body["reports"].as_array().expect("reports");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["id"], report.id.as_str());
        assert_eq!(listed[0]["status"], "pending");
    }
    Ok(())
}

#[actix_web::test]
async fn test_user_cannot_list_reports() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state();
    let app = create_test_app(state.clone()).await;

    let req = test::TestRequest::get()
        .uri("/api/movie/admin/reports")
        .insert_header(("Authorization", bearer("u1", Role::User, &state.security)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, 403, "INSUFFICIENT_ROLE", None).await;
    Ok(())
}

#[actix_web::test]
async fn test_approve_flags_movie() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state();
    let movie_id = seed_movie(&state, "owner").await;
    let report = seed_report(&state, &movie_id, "viewer").await;
    let app = create_test_app(state.clone()).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/movie/admin/reports/manage/{}", report.id))
        .insert_header(("Authorization", bearer("admin", Role::Admin, &state.security)))
        .set_json(json!({"action": "approve"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Report approved successfully");

    let stored = reports::find_report(state.store.as_ref(), &report.id)
        .await?
        .expect("report kept");
    assert_eq!(stored.status, ReportStatus::Approved);
    let movie = movies::find_movie(state.store.as_ref(), &movie_id)
        .await?
        .expect("movie");
    assert_eq!(movie.status, Some(MovieStatus::Reported));
    Ok(())
}

#[actix_web::test]
async fn test_reject_deletes_report() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state();
    let movie_id = seed_movie(&state, "owner").await;
    let report = seed_report(&state, &movie_id, "viewer").await;
    let app = create_test_app(state.clone()).await;
    let auth = bearer("admin", Role::Admin, &state.security);

    let req = test::TestRequest::post()
        .uri(&format!("/api/movie/admin/reports/manage/{}", report.id))
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({"action": "reject"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Report rejected and deleted successfully");

    assert!(reports::find_report(state.store.as_ref(), &report.id)
        .await?
        .is_none());
    let movie = movies::find_movie(state.store.as_ref(), &movie_id)
        .await?
        .expect("movie");
    assert_eq!(movie.status, None);

    // Already gone
    let req = test::TestRequest::post()
        .uri(&format!("/api/movie/admin/reports/manage/{}", report.id))
        .insert_header(("Authorization", auth))
        .set_json(json!({"action": "reject"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, 404, "REPORT_NOT_FOUND", Some("Report not found")).await;
    Ok(())
}

#[actix_web::test]
async fn test_manage_rejects_unknown_action() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state();
    let app = create_test_app(state.clone()).await;

    let req = test::TestRequest::post()
        .uri("/api/movie/admin/reports/manage/r1")
        .insert_header(("Authorization", bearer("admin", Role::Admin, &state.security)))
        .set_json(json!({"action": "escalate"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(
        resp,
        400,
        "VALIDATION_ERROR",
        Some("Action must be either \"approve\" or \"reject\""),
    )
    .await;
    Ok(())
}
