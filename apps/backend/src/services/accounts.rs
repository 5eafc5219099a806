//! Registration and password login.

use std::time::SystemTime;

use tracing::info;

use crate::auth::claims::Role;
use crate::auth::jwt::{mint_credentials, CredentialPair};
use crate::auth::password::{hash_password, verify_password};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::logging::security;
use crate::repos::users::{self, User};
use crate::state::security_config::SecurityConfig;
use crate::store::DocumentStore;

#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// How a login names its account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginKey {
    Email(String),
    Username(String),
}

impl LoginKey {
    fn as_str(&self) -> &str {
        match self {
            LoginKey::Email(s) | LoginKey::Username(s) => s,
        }
    }
}

/// Create an account. Email is checked for uniqueness before username.
///
/// The lookups up front only spare a password hash for obvious duplicates;
/// `users::create_user` enforces uniqueness atomically, so concurrent
/// registrations with the same email or username admit exactly one.
pub async fn register(store: &dyn DocumentStore, reg: Registration) -> Result<User, AppError> {
    if users::find_user_by_email(store, &reg.email).await?.is_some() {
        return Err(users::email_taken().into());
    }
    if users::find_user_by_username(store, &reg.username)
        .await?
        .is_some()
    {
        return Err(users::username_taken().into());
    }

    let password = reg.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::internal(format!("password hashing task failed: {e}")))??;

    let user = users::create_user(
        store,
        User {
            id: String::new(),
            username: reg.username,
            email: reg.email,
            password_hash,
            role: reg.role,
        },
    )
    .await?;

    info!(
        user_id = %user.id,
        email = %Redacted(&user.email),
        role = user.role.as_str(),
        "User registered"
    );
    Ok(user)
}

/// Check a password login and mint a credential pair for the account.
pub async fn login(
    store: &dyn DocumentStore,
    key: LoginKey,
    password: String,
    security: &SecurityConfig,
    now: SystemTime,
) -> Result<CredentialPair, AppError> {
    let account = match &key {
        LoginKey::Email(email) => users::find_user_by_email(store, email).await?,
        LoginKey::Username(username) => users::find_user_by_username(store, username).await?,
    };

    let Some(user) = account else {
        security::login_failed("account_not_found", key.as_str());
        return Err(AppError::bad_request(
            ErrorCode::AccountNotFound,
            "Please register first.",
        ));
    };

    let User {
        id,
        password_hash,
        role,
        ..
    } = user;
    let identity =
        tokio::task::spawn_blocking(move || verify_password(&password, &password_hash, &id, role))
            .await
            .map_err(|e| AppError::internal(format!("password verify task failed: {e}")))?;

    let Some(identity) = identity else {
        security::login_failed("invalid_password", key.as_str());
        return Err(AppError::bad_request(
            ErrorCode::InvalidPassword,
            "Invalid password.",
        ));
    };

    info!(user_id = identity.subject_id(), "Login succeeded");
    mint_credentials(&identity, now, security)
}
