//! Account records.

use serde::{Deserialize, Serialize};

use super::{from_document, to_fields};
use crate::auth::claims::Role;
use crate::errors::domain::ConflictKind;
use crate::errors::DomainError;
use crate::store::{Collection, DocumentStore, Filter};

/// Stored account. `password_hash` is an Argon2 PHC string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Email is checked before username.
const UNIQUE_FIELDS: [&str; 2] = ["email", "username"];

/// Insert an account. Fails with `UniqueEmail` or `UniqueUsername` when
/// another account already holds the value, including one inserted
/// concurrently.
pub async fn create_user(store: &dyn DocumentStore, user: User) -> Result<User, DomainError> {
    let id = store
        .add_unique(Collection::Users, to_fields(&user)?, &UNIQUE_FIELDS)
        .await
        .map_err(account_conflict)?;
    Ok(User { id, ..user })
}

pub fn email_taken() -> DomainError {
    DomainError::conflict(ConflictKind::UniqueEmail, "Email is already registered.")
}

pub fn username_taken() -> DomainError {
    DomainError::conflict(ConflictKind::UniqueUsername, "Username is already taken.")
}

fn account_conflict(err: DomainError) -> DomainError {
    match err {
        DomainError::Conflict(ConflictKind::Other(field), _) if field == "email" => email_taken(),
        DomainError::Conflict(ConflictKind::Other(field), _) if field == "username" => {
            username_taken()
        }
        other => other,
    }
}

pub async fn find_user_by_email(
    store: &dyn DocumentStore,
    email: &str,
) -> Result<Option<User>, DomainError> {
    find_one(store, Filter::eq("email", email)).await
}

pub async fn find_user_by_username(
    store: &dyn DocumentStore,
    username: &str,
) -> Result<Option<User>, DomainError> {
    find_one(store, Filter::eq("username", username)).await
}

async fn find_one(store: &dyn DocumentStore, filter: Filter) -> Result<Option<User>, DomainError> {
    store
        .query(Collection::Users, &[filter])
        .await?
        .into_iter()
        .next()
        .map(from_document)
        .transpose()
}
