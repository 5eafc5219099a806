//! Per-request authentication and authorization decisions.
//!
//! These are pure functions over headers, a clock and the security config;
//! `middleware::access_gate` wires them into the request pipeline.
//!
//! Order is fixed: bearer present → signature → expiry → role. Every branch
//! has exactly one rejection and nothing falls through to an implicit allow.

use std::time::SystemTime;

use actix_web::http::header::{self, HeaderMap};

use crate::auth::claims::{AuthenticatedIdentity, Role};
use crate::auth::jwt::verify_access_token_at;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// A missing header, a non-ASCII value, another scheme or an empty token all
/// mean no bearer credential was presented.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(AppError::missing_credential)?
        .to_str()
        .map_err(|_| AppError::missing_credential())?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AppError::missing_credential()),
    }
}

/// Authenticate a request from its headers as of `now`.
pub fn authenticate(
    headers: &HeaderMap,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<AuthenticatedIdentity, AppError> {
    let token = extract_bearer(headers)?;
    let claims = verify_access_token_at(token, now, security)?;
    Ok(claims.into())
}

/// Allow the identity through only if its snapshot role is in `allowed`.
pub fn authorize(identity: &AuthenticatedIdentity, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.contains(&identity.role) {
        Ok(())
    } else {
        Err(AppError::forbidden_role())
    }
}
