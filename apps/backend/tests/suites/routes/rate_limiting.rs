// Rate limiting on the auth and API route groups
//
// Production keys on the client IP; test requests carry no peer address, so
// these use the same limits keyed by path, and each limiter gets its own
// backend just as `main` does.

use std::time::Duration;

use actix_extensible_rate_limit::backend::memory::InMemoryBackend;
use actix_extensible_rate_limit::backend::SimpleInputFunctionBuilder;
use actix_extensible_rate_limit::RateLimiter;
use actix_web::{test, web, App};
use marquee_backend::middleware::rate_limit::{API_REQUESTS_PER_WINDOW, AUTH_REQUESTS_PER_WINDOW};
use marquee_backend::middleware::request_trace::RequestTrace;
use marquee_backend::middleware::structured_logger::StructuredLogger;
use marquee_backend::middleware::trace_span::TraceSpan;
use marquee_backend::routes;
use serde_json::json;

use crate::support::test_state;

#[actix_web::test]
async fn test_auth_group_limit() -> Result<(), Box<dyn std::error::Error>> {
    let input = SimpleInputFunctionBuilder::new(Duration::from_secs(60), AUTH_REQUESTS_PER_WINDOW)
        .path_key()
        .build();
    let limiter = RateLimiter::builder(InMemoryBackend::builder().build(), input)
        .add_headers()
        .build();

    let app = test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(web::Data::new(test_state()))
            .service(
                web::scope("/api/auth")
                    .wrap(limiter)
                    .configure(routes::auth::configure_routes),
            ),
    )
    .await;

    let login = || {
        test::TestRequest::post()
            .uri("/api/auth/login/emailpassword")
            .set_json(json!({"email": "nobody@example.test", "password": "secret1"}))
            .to_request()
    };

    for i in 0..AUTH_REQUESTS_PER_WINDOW {
        let resp = test::call_service(&app, login()).await;
        assert_eq!(
            resp.status().as_u16(),
            400,
            "request {} should reach the handler",
            i + 1
        );
        assert!(resp.headers().contains_key("x-ratelimit-remaining"));
    }

    let resp = test::call_service(&app, login()).await;
    assert_eq!(resp.status().as_u16(), 429);
    Ok(())
}

#[actix_web::test]
async fn test_api_group_limit_does_not_touch_health() -> Result<(), Box<dyn std::error::Error>> {
    let input = SimpleInputFunctionBuilder::new(Duration::from_secs(60), API_REQUESTS_PER_WINDOW)
        .path_key()
        .build();
    let limiter = RateLimiter::builder(InMemoryBackend::builder().build(), input)
        .add_headers()
        .build();

    let app = test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(web::Data::new(test_state()))
            .configure(routes::health::configure_routes)
            .service(
                web::scope("/api")
                    .wrap(limiter)
                    .configure(routes::configure_api),
            ),
    )
    .await;

    for _ in 0..API_REQUESTS_PER_WINDOW {
        let req = test::TestRequest::get().uri("/api/movie/all").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 401);
    }

    let req = test::TestRequest::get().uri("/api/movie/all").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 429);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    Ok(())
}
