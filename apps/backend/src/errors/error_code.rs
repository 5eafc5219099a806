//! Error codes for the Marquee backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the Marquee backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Credentials & access
    /// No bearer credential on a protected route
    UnauthorizedMissingBearer,
    /// Credential is malformed or its signature does not verify
    InvalidToken,
    /// Credential signature is valid but the credential has expired
    TokenExpired,
    /// Authenticated role is not permitted on this route group
    InsufficientRole,
    /// Caller does not own the resource it tries to modify
    NotResourceOwner,

    // Login
    /// No account matches the presented email or username
    AccountNotFound,
    /// Password does not match the stored hash
    InvalidPassword,

    // Request validation
    ValidationError,
    BadRequest,

    // Resource not found
    MovieNotFound,
    ReportNotFound,
    UserNotFound,
    NotFound,

    // Conflicts
    UniqueEmail,
    UniqueUsername,
    Conflict,

    // System errors
    StoreError,
    StoreUnavailable,
    DataCorruption,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::InsufficientRole => "INSUFFICIENT_ROLE",
            Self::NotResourceOwner => "NOT_RESOURCE_OWNER",

            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::InvalidPassword => "INVALID_PASSWORD",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::MovieNotFound => "MOVIE_NOT_FOUND",
            Self::ReportNotFound => "REPORT_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::UniqueUsername => "UNIQUE_USERNAME",
            Self::Conflict => "CONFLICT",

            Self::StoreError => "STORE_ERROR",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
