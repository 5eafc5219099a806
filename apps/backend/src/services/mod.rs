use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::AppError;

pub mod accounts;
pub mod catalog;
pub mod moderation;
pub mod ratings;

/// Current UTC time as an RFC 3339 string, as stored in `created_at` and
/// `updated_at`.
pub(crate) fn now_rfc3339() -> Result<String, AppError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| AppError::internal(format!("Failed to format timestamp: {e}")))
}
