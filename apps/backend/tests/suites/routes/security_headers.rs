// Security headers on real routes, including gate rejections

use actix_web::test;

use crate::support::app_builder::create_test_app;
use crate::support::test_state;

const ALWAYS: [&str; 6] = [
    "x-content-type-options",
    "x-frame-options",
    "strict-transport-security",
    "referrer-policy",
    "permissions-policy",
    "x-xss-protection",
];

#[actix_web::test]
async fn test_headers_on_health_and_rejections() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(test_state()).await;

    for uri in ["/health", "/api/movie/all"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        let headers = resp.headers();

        for name in ALWAYS {
            assert!(headers.contains_key(name), "{uri} should include {name}");
        }
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
        assert_eq!(headers.get("cache-control").unwrap(), "no-store");
        assert_eq!(
            headers.get("content-security-policy").unwrap(),
            "default-src 'none'; frame-ancestors 'none'"
        );
    }
    Ok(())
}

#[actix_web::test]
async fn test_root_is_cacheable() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(test_state()).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.headers().contains_key("x-content-type-options"));
    assert!(!resp.headers().contains_key("cache-control"));
    assert_eq!(
        resp.headers().get("content-security-policy").unwrap(),
        "default-src 'self'; frame-ancestors 'none'"
    );
    Ok(())
}
