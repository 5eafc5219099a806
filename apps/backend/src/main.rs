use std::sync::Arc;

use actix_extensible_rate_limit::backend::memory::InMemoryBackend;
use actix_extensible_rate_limit::RateLimiter;
use actix_web::{web, App, HttpServer};
use marquee_backend::config::ServerConfig;
use marquee_backend::middleware::cors::cors_middleware;
use marquee_backend::middleware::rate_limit::{api_rate_limit_config, auth_rate_limit_config};
use marquee_backend::middleware::request_trace::RequestTrace;
use marquee_backend::middleware::security_headers::SecurityHeaders;
use marquee_backend::middleware::structured_logger::StructuredLogger;
use marquee_backend::middleware::trace_span::TraceSpan;
use marquee_backend::routes;
use marquee_backend::state::app_state::AppState;
use marquee_backend::state::security_config::SecurityConfig;
use marquee_backend::store::MemoryStore;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    let server = match ServerConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let security = match SecurityConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let data = web::Data::new(AppState::new(Arc::new(MemoryStore::new()), security));

    // Backends are shared by every worker so limits are per process, not per
    // worker. Separate backends keep the two groups' counters apart.
    let auth_limits = InMemoryBackend::builder().build();
    let api_limits = InMemoryBackend::builder().build();

    tracing::info!(host = %server.host, port = server.port, "Starting Marquee backend");

    HttpServer::new(move || {
        let auth_limiter =
            RateLimiter::builder(auth_limits.clone(), auth_rate_limit_config().build())
                .add_headers()
                .build();
        let api_limiter =
            RateLimiter::builder(api_limits.clone(), api_rate_limit_config().build())
                .add_headers()
                .build();

        App::new()
            .wrap(cors_middleware())
            .wrap(SecurityHeaders)
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::health::configure_routes)
            .service(
                web::scope("/api/auth")
                    .wrap(auth_limiter)
                    .configure(routes::auth::configure_routes),
            )
            .service(
                web::scope("/api")
                    .wrap(api_limiter)
                    .configure(routes::configure_api),
            )
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
