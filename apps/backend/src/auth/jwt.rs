use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;
use ulid::Ulid;

use crate::auth::claims::{CredentialClaims, CredentialKind, VerifiedIdentity};
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Access and refresh credentials minted together for one login.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Mint an access/refresh pair for an identity that already passed the
/// password check.
///
/// Both credentials embed the same subject and role; each is signed with the
/// secret for its own kind and expires after that kind's TTL.
pub fn mint_credentials(
    identity: &VerifiedIdentity,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<CredentialPair, AppError> {
    Ok(CredentialPair {
        access_token: mint(identity, CredentialKind::Access, now, security)?,
        refresh_token: mint(identity, CredentialKind::Refresh, now, security)?,
    })
}

fn mint(
    identity: &VerifiedIdentity,
    kind: CredentialKind,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = unix_seconds(now)?;
    let exp = iat + security.ttl(kind).as_secs() as i64;

    let claims = CredentialClaims {
        sub: identity.subject_id().to_string(),
        role: identity.role(),
        iat,
        exp,
        jti: Ulid::new().to_string(),
    };

    encode(
        &Header::new(security.algorithm()),
        &claims,
        &EncodingKey::from_secret(security.secret(kind)),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify an access credential against the current time.
pub fn verify_access_token(
    token: &str,
    security: &SecurityConfig,
) -> Result<CredentialClaims, AppError> {
    verify_access_token_at(token, SystemTime::now(), security)
}

/// Verify an access credential as of `now`.
///
/// Errors:
/// - malformed token, wrong secret, wrong algorithm or unknown role → `AppError::InvalidCredential`
/// - valid signature but `now >= exp` → `AppError::ExpiredCredential`
pub fn verify_access_token_at(
    token: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<CredentialClaims, AppError> {
    verify(token, CredentialKind::Access, now, security)
}

/// Verify a refresh credential as of `now`.
///
/// No route exchanges refresh credentials yet; this is the primitive such an
/// exchange would call.
pub fn verify_refresh_token_at(
    token: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<CredentialClaims, AppError> {
    verify(token, CredentialKind::Refresh, now, security)
}

fn verify(
    token: &str,
    kind: CredentialKind,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<CredentialClaims, AppError> {
    // Pin the algorithm. Expiry is checked below against the caller's clock,
    // strictly after the signature has verified.
    let mut validation = Validation::new(security.algorithm());
    validation.validate_exp = false;
    validation.leeway = 0;

    let claims = decode::<CredentialClaims>(
        token,
        &DecodingKey::from_secret(security.secret(kind)),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::invalid_credential())?;

    if unix_seconds(now)? >= claims.exp {
        return Err(AppError::expired_credential());
    }

    Ok(claims)
}

fn unix_seconds(t: SystemTime) -> Result<i64, AppError> {
    t.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .map_err(|_| AppError::internal("System clock is before the Unix epoch"))
}
