#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use backend_test_support::problem_details::{assert_problem_details, ProblemDetailsLike};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Validate a ProblemDetails response, including the header rules from
/// `AppError::error_response`: 401 carries `WWW-Authenticate: Bearer`,
/// nothing else does.
pub async fn assert_problem<B: MessageBody>(
    resp: ServiceResponse<B>,
    expected_status: u16,
    expected_code: &str,
    expected_detail: Option<&str>,
) -> ProblemDetailsLike {
    let www_auth = resp
        .headers()
        .get("www-authenticate")
        .map(|v| v.to_str().unwrap().to_string());

    if expected_status == 401 {
        assert_eq!(
            www_auth.as_deref(),
            Some("Bearer"),
            "401 responses must have WWW-Authenticate per RFC 7235"
        );
    } else {
        assert!(
            www_auth.is_none(),
            "{expected_status} responses must not have WWW-Authenticate"
        );
    }

    let status = StatusCode::from_u16(expected_status).unwrap();
    let problem = assert_problem_details(resp, expected_code, status, expected_detail).await;

    assert_eq!(
        problem.type_,
        format!("https://marquee.dev/errors/{expected_code}")
    );
    assert!(!problem.title.is_empty());
    problem
}
