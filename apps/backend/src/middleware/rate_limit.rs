//! Rate limiting configuration helpers
//!
//! - Authentication endpoints: 5 requests per minute per IP
//! - Other API endpoints: 100 requests per minute per IP
//! - Root and health: not limited

use std::time::Duration;

use actix_extensible_rate_limit::backend::SimpleInputFunctionBuilder;

const WINDOW: Duration = Duration::from_secs(60);

pub const AUTH_REQUESTS_PER_WINDOW: u64 = 5;
pub const API_REQUESTS_PER_WINDOW: u64 = 100;

/// Register and login, keyed by client IP.
pub fn auth_rate_limit_config() -> SimpleInputFunctionBuilder {
    SimpleInputFunctionBuilder::new(WINDOW, AUTH_REQUESTS_PER_WINDOW).real_ip_key()
}

/// Everything under `/api` except auth, keyed by client IP.
pub fn api_rate_limit_config() -> SimpleInputFunctionBuilder {
    SimpleInputFunctionBuilder::new(WINDOW, API_REQUESTS_PER_WINDOW).real_ip_key()
}
