use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Standard email addresses
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
});

/// Compact JWS: three base64url segments
static JWT: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}").unwrap()
});

/// Argon2 PHC strings
static PHC_HASH: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\$argon2(id|i|d)\$\S+").unwrap()
});

/// Masks credentials and personal data before a string reaches the logs.
///
/// - emails keep the first character of the local part and the full domain
/// - bearer credentials become `[REDACTED_JWT]`
/// - password hashes become `[REDACTED_HASH]`
pub fn redact(input: &str) -> String {
    let no_hashes = PHC_HASH.replace_all(input, "[REDACTED_HASH]");
    let no_tokens = JWT.replace_all(&no_hashes, "[REDACTED_JWT]");

    EMAIL
        .replace_all(&no_tokens, |caps: &regex::Captures| {
            let full = &caps[0];
            match full.split_once('@') {
                Some((local, domain)) if !local.is_empty() => {
                    format!("{}***@{domain}", &local[..1])
                }
                _ => full.to_string(),
            }
        })
        .into_owned()
}

/// Wrapper that redacts its contents when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
