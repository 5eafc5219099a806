pub mod claims;
pub mod gate;
pub mod jwt;
pub mod password;
pub mod permissions;

pub use claims::{AuthenticatedIdentity, CredentialClaims, CredentialKind, Role, VerifiedIdentity};
pub use jwt::{
    mint_credentials, verify_access_token, verify_access_token_at, verify_refresh_token_at,
    CredentialPair,
};
pub use permissions::RouteGroup;
