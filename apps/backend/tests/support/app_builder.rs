use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use marquee_backend::middleware::request_trace::RequestTrace;
use marquee_backend::middleware::security_headers::SecurityHeaders;
use marquee_backend::middleware::structured_logger::StructuredLogger;
use marquee_backend::middleware::trace_span::TraceSpan;
use marquee_backend::routes;
use marquee_backend::state::app_state::AppState;

/// Production routes and middleware minus rate limiting and CORS.
pub async fn create_test_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    create_test_app_with(state, routes::configure).await
}

/// Same middleware stack around custom routes.
pub async fn create_test_app_with<F>(
    state: AppState,
    config_fn: F,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>
where
    F: FnOnce(&mut web::ServiceConfig),
{
    test::init_service(
        App::new()
            .wrap(SecurityHeaders)
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(config_fn),
    )
    .await
}
