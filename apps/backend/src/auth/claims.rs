//! Identity and credential claim types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account role, snapshotted into every credential at mint time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            _ => Err(()),
        }
    }
}

/// The two credential kinds. They differ only in signing secret and
/// validity window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    Access,
    Refresh,
}

/// Claims carried inside both access and refresh credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialClaims {
    /// Account identifier
    pub sub: String,
    pub role: Role,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    /// Unique per mint
    pub jti: String,
}

/// An identity whose password has already been checked.
///
/// Only the password verifier in `auth::password` can construct this, so the
/// credential issuer cannot be handed an unverified claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    subject_id: String,
    role: Role,
}

impl VerifiedIdentity {
    pub(in crate::auth) fn new(subject_id: impl Into<String>, role: Role) -> Self {
        Self {
            subject_id: subject_id.into(),
            role,
        }
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

/// Identity attached to a request once its access credential verified.
///
/// Inserted into request extensions by the access gate; handlers read it
/// through the `CurrentUser` extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedIdentity {
    pub subject_id: String,
    pub role: Role,
    /// Issued-at of the credential (seconds since epoch), for audit only
    pub issued_at: i64,
}

impl From<CredentialClaims> for AuthenticatedIdentity {
    fn from(claims: CredentialClaims) -> Self {
        Self {
            subject_id: claims.sub,
            role: claims.role,
            issued_at: claims.iat,
        }
    }
}
