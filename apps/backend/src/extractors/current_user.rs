use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::auth::claims::{AuthenticatedIdentity, Role};
use crate::error::AppError;

/// Caller admitted by the access gate.
///
/// Built from the `AuthenticatedIdentity` the gate stored in request
/// extensions. The role is the snapshot from the credential, not a fresh
/// lookup. Using this extractor on a route without the gate yields 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub role: Role,
}

impl From<AuthenticatedIdentity> for CurrentUser {
    fn from(identity: AuthenticatedIdentity) -> Self {
        Self {
            id: identity.subject_id,
            role: identity.role,
        }
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = req
            .extensions()
            .get::<AuthenticatedIdentity>()
            .cloned()
            .map(CurrentUser::from)
            .ok_or_else(AppError::missing_credential);
        ready(identity)
    }
}
