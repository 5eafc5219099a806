//! Request body rules.
//!
//! Each rule checks one field of a JSON object body and fails with a
//! `VALIDATION_ERROR` carrying a human-readable message. Request types check
//! their fields in declaration order, so the message a client sees is the
//! first rule that failed.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::error::AppError;

/// A parsed JSON object request body.
pub type Body = Map<String, Value>;

/// Request types built from a JSON object body.
pub trait FromBody: Sized {
    fn from_body(body: &Body) -> Result<Self, AppError>;
}

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$").unwrap()
});

fn fail(message: impl Into<String>) -> AppError {
    AppError::invalid(message)
}

fn is_absent(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// A present, non-blank string, trimmed.
pub fn required_str(body: &Body, key: &str, label: &str) -> Result<String, AppError> {
    let value = body.get(key);
    if is_absent(value) {
        return Err(fail(format!("{label} is required")));
    }
    optional_str(body, key, label).map(|s| s.unwrap_or_default())
}

/// A string when present, trimmed. `null` counts as absent.
pub fn optional_str(body: &Body, key: &str, label: &str) -> Result<Option<String>, AppError> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        Some(_) => Err(fail(format!("{label} must be a string"))),
    }
}

pub fn length_between(
    value: &str,
    min: usize,
    max: usize,
    message: &str,
) -> Result<(), AppError> {
    let len = value.chars().count();
    if (min..=max).contains(&len) {
        Ok(())
    } else {
        Err(fail(message))
    }
}

pub fn username(body: &Body) -> Result<String, AppError> {
    let name = required_str(body, "username", "User name")?;
    length_between(
        &name,
        3,
        255,
        "User name must be between 3 to 255 characters long",
    )?;
    if name.chars().any(char::is_whitespace) {
        return Err(fail("Username must not contain spaces"));
    }
    Ok(name)
}

pub fn email(body: &Body) -> Result<String, AppError> {
    let email = required_str(body, "email", "Email")?;
    if !EMAIL.is_match(&email) {
        return Err(fail("Invalid email format"));
    }
    length_between(&email, 0, 255, "Email must be at most 255 characters long")?;
    Ok(email)
}

pub fn password(body: &Body) -> Result<String, AppError> {
    let password = required_str(body, "password", "Password")?;
    if password.chars().count() < 6 {
        return Err(fail("Password must be at least 6 characters long"));
    }
    Ok(password)
}

/// ISO-8601 calendar date, local date-time, or RFC 3339 timestamp.
pub fn is_iso8601(value: &str) -> bool {
    Date::parse(value, format_description!("[year]-[month]-[day]")).is_ok()
        || PrimitiveDateTime::parse(
            value,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        )
        .is_ok()
        || OffsetDateTime::parse(value, &Rfc3339).is_ok()
}

/// A JSON number or a numeric string.
pub fn number(value: &Value, message: &str) -> Result<f64, AppError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite()).ok_or_else(|| fail(message))
}

/// An integer in `min..=max`, given as a JSON integer or an integer string.
pub fn int_in_range(value: &Value, min: i64, max: i64, message: &str) -> Result<i64, AppError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed
        .filter(|n| (min..=max).contains(n))
        .ok_or_else(|| fail(message))
}

/// Non-blank value under `key`, or "`label` is required".
pub fn required_value<'a>(body: &'a Body, key: &str, label: &str) -> Result<&'a Value, AppError> {
    let value = body.get(key);
    if is_absent(value) {
        return Err(fail(format!("{label} is required")));
    }
    value.ok_or_else(|| fail(format!("{label} is required")))
}

/// Path ids are bounded so they can't be used to hit the store with
/// arbitrarily large keys.
pub fn path_id(value: &str, label: &str) -> Result<String, AppError> {
    let id = value.trim();
    if id.is_empty() {
        return Err(fail(format!("{label} is required")));
    }
    length_between(id, 1, 64, &format!("{label} must be at most 64 characters long"))?;
    Ok(id.to_string())
}
