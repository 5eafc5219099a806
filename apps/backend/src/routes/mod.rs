use actix_web::web;

use crate::auth::permissions::RouteGroup;
use crate::middleware::access_gate::AccessGate;

pub mod admin_reports;
pub mod auth;
pub mod health;
pub mod movies;
pub mod ratings;

/// Configure every route without rate limiting.
///
/// In production, `main.rs` registers the same pieces under rate-limited
/// scopes. Tests use this to exercise endpoint behavior directly.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Root and /health
    cfg.configure(health::configure_routes);

    // Auth routes: /api/auth/**
    cfg.service(web::scope("/api/auth").configure(auth::configure_routes));

    // Protected routes: /api/movie/**
    cfg.service(web::scope("/api").configure(configure_api));
}

/// Protected routes relative to `/api`, each group behind its own access
/// gate. Scopes match by prefix in registration order, so the nested groups
/// come before the catalog.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/movie/rate")
            .wrap(AccessGate::new(RouteGroup::Ratings))
            .configure(ratings::configure_routes),
    )
    .service(
        web::scope("/movie/admin/reports")
            .wrap(AccessGate::new(RouteGroup::Moderation))
            .configure(admin_reports::configure_routes),
    )
    .service(
        web::scope("/movie")
            .wrap(AccessGate::new(RouteGroup::Catalog))
            .configure(movies::configure_routes),
    );
}
