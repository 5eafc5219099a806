// POST /api/movie/rate/{movie_id}

use actix_web::test;
use marquee_backend::auth::claims::Role;
use marquee_backend::repos::movies;
use serde_json::{json, Value};

use crate::common::assert_problem;
use crate::support::app_builder::create_test_app;
use crate::support::auth::bearer;
use crate::support::factory::seed_movie;
use crate::support::test_state;

#[actix_web::test]
async fn test_ratings_aggregate_and_upsert() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state();
    let movie_id = seed_movie(&state, "owner").await;
    let app = create_test_app(state.clone()).await;
    let uri = format!("/api/movie/rate/{movie_id}");

    let rate = |user: &str, rating: Value| {
        test::TestRequest::post()
            .uri(&uri)
            .insert_header(("Authorization", bearer(user, Role::User, &state.security)))
            .set_json(json!({ "rating": rating }))
            .to_request()
    };

    let body: Value = test::call_and_read_body_json(&app, rate("alice", json!(5))).await;
    assert_eq!(body["message"], "Rating added/updated successfully");
    assert_eq!(body["avg_rating"], 5.0);
    assert_eq!(body["total_rating"], 1);

    let body: Value = test::call_and_read_body_json(&app, rate("bob", json!(4))).await;
    assert_eq!(body["avg_rating"], 4.5);
    assert_eq!(body["total_rating"], 2);

    // Re-rating replaces alice's earlier rating instead of adding one
    let body: Value = test::call_and_read_body_json(&app, rate("alice", json!("2"))).await;
    assert_eq!(body["avg_rating"], 3.0);
    assert_eq!(body["total_rating"], 2);

    let body: Value = test::call_and_read_body_json(&app, rate("carol", json!(2))).await;
    assert_eq!(body["avg_rating"], 2.67);
    assert_eq!(body["total_rating"], 3);

    let stored = movies::find_movie(state.store.as_ref(), &movie_id)
        .await?
        .expect("movie");
    assert_eq!(stored.avg_rating, 2.67);
    assert_eq!(stored.total_rating, 3);
    Ok(())
}

#[actix_web::test]
async fn test_rating_out_of_range() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state();
    let movie_id = seed_movie(&state, "owner").await;
    let app = create_test_app(state.clone()).await;

    for rating in [json!(0), json!(6), json!(3.5), json!("five"), json!(null)] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/movie/rate/{movie_id}"))
            .insert_header(("Authorization", bearer("u1", Role::User, &state.security)))
            .set_json(json!({ "rating": rating }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem(resp, 400, "VALIDATION_ERROR", None).await;
    }
    Ok(())
}

#[actix_web::test]
async fn test_rating_unknown_movie() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state();
    let app = create_test_app(state.clone()).await;

    let req = test::TestRequest::post()
        .uri("/api/movie/rate/missing")
        .insert_header(("Authorization", bearer("u1", Role::Admin, &state.security)))
        .set_json(json!({ "rating": 3 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, 404, "MOVIE_NOT_FOUND", None).await;
    Ok(())
}

#[actix_web::test]
async fn test_rating_requires_credential() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(test_state()).await;

    let req = test::TestRequest::post()
        .uri("/api/movie/rate/anything")
        .set_json(json!({ "rating": 3 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, 401, "UNAUTHORIZED_MISSING_BEARER", None).await;
    Ok(())
}
