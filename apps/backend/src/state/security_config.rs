use std::fmt;
use std::time::Duration;

use jsonwebtoken::Algorithm;

use crate::auth::claims::CredentialKind;
use crate::error::AppError;

/// Environment variable holding the access-credential signing secret.
pub const ACCESS_SECRET_ENV: &str = "JWT_SECRET";
/// Environment variable holding the refresh-credential signing secret.
pub const REFRESH_SECRET_ENV: &str = "JWT_REFRESH_SECRET";

const ACCESS_TTL: Duration = Duration::from_secs(60 * 60);
const REFRESH_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Signing material and validity windows for both credential kinds.
///
/// Built once at startup and shared read-only through `AppState`. A value of
/// this type always holds two non-empty, distinct secrets, so signing and
/// verification never have to re-check configuration per request.
#[derive(Clone)]
pub struct SecurityConfig {
    access_secret: Vec<u8>,
    refresh_secret: Vec<u8>,
    algorithm: Algorithm,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl SecurityConfig {
    /// Create a config from explicit secrets.
    ///
    /// Errors with `AppError::Config` when either secret is empty or when both
    /// kinds would share one secret.
    pub fn new(
        access_secret: impl Into<Vec<u8>>,
        refresh_secret: impl Into<Vec<u8>>,
    ) -> Result<Self, AppError> {
        let access_secret = access_secret.into();
        let refresh_secret = refresh_secret.into();

        if access_secret.iter().all(u8::is_ascii_whitespace) {
            return Err(AppError::config(format!("{ACCESS_SECRET_ENV} is empty")));
        }
        if refresh_secret.iter().all(u8::is_ascii_whitespace) {
            return Err(AppError::config(format!("{REFRESH_SECRET_ENV} is empty")));
        }
        if access_secret == refresh_secret {
            return Err(AppError::config(format!(
                "{ACCESS_SECRET_ENV} and {REFRESH_SECRET_ENV} must differ"
            )));
        }

        Ok(Self {
            access_secret,
            refresh_secret,
            algorithm: Algorithm::HS256,
            access_ttl: ACCESS_TTL,
            refresh_ttl: REFRESH_TTL,
        })
    }

    /// Read both secrets from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        let access = std::env::var(ACCESS_SECRET_ENV)
            .map_err(|_| AppError::config(format!("{ACCESS_SECRET_ENV} must be set")))?;
        let refresh = std::env::var(REFRESH_SECRET_ENV)
            .map_err(|_| AppError::config(format!("{REFRESH_SECRET_ENV} must be set")))?;

        Self::new(access.into_bytes(), refresh.into_bytes())
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn secret(&self, kind: CredentialKind) -> &[u8] {
        match kind {
            CredentialKind::Access => &self.access_secret,
            CredentialKind::Refresh => &self.refresh_secret,
        }
    }

    pub fn ttl(&self, kind: CredentialKind) -> Duration {
        match kind {
            CredentialKind::Access => self.access_ttl,
            CredentialKind::Refresh => self.refresh_ttl,
        }
    }

    /// Random secrets for tests.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        let access = format!("access-{}", ulid::Ulid::new());
        let refresh = format!("refresh-{}", ulid::Ulid::new());
        // Non-empty and distinct by construction.
        Self::new(access, refresh).unwrap()
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("access_secret", &"[REDACTED]")
            .field("refresh_secret", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}
