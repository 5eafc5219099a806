use actix_web::test;
use serde_json::Value;

use crate::support::app_builder::create_test_app;
use crate::support::test_state;

#[actix_web::test]
async fn test_root_is_empty_200() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(test_state()).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    assert!(test::read_body(resp).await.is_empty());
    Ok(())
}

#[actix_web::test]
async fn test_health_reports_ok() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(test_state()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp.headers().contains_key("x-request-id"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert!(body["app_version"].is_string());
    assert!(body["time"].is_string());
    Ok(())
}
