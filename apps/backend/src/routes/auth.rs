use std::time::SystemTime;

use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::auth::claims::Role;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::services::accounts::{self, LoginKey, Registration};
use crate::state::app_state::AppState;
use crate::validation::{self, Body, FromBody};

impl FromBody for Registration {
    fn from_body(body: &Body) -> Result<Self, AppError> {
        Ok(Self {
            username: validation::username(body)?,
            email: validation::email(body)?,
            password: validation::password(body)?,
            role: role(body)?,
        })
    }
}

/// Optional `role`, `user` when absent.
fn role(body: &Body) -> Result<Role, AppError> {
    let Some(raw) = validation::optional_str(body, "role", "User role")? else {
        return Ok(Role::User);
    };
    if raw.is_empty() {
        return Ok(Role::User);
    }
    validation::length_between(&raw, 1, 10, "Role must be at most 10 characters long")?;
    raw.parse::<Role>()
        .map_err(|()| AppError::invalid(r#"Role must be either "admin" or "user""#))
}

#[derive(Debug)]
pub struct EmailLogin {
    email: String,
    password: String,
}

impl FromBody for EmailLogin {
    fn from_body(body: &Body) -> Result<Self, AppError> {
        Ok(Self {
            email: validation::email(body)?,
            password: validation::password(body)?,
        })
    }
}

#[derive(Debug)]
pub struct UsernameLogin {
    username: String,
    password: String,
}

impl FromBody for UsernameLogin {
    fn from_body(body: &Body) -> Result<Self, AppError> {
        Ok(Self {
            username: validation::username(body)?,
            password: validation::password(body)?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

async fn register(
    body: ValidatedJson<Registration>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    accounts::register(app_state.store.as_ref(), body.into_inner()).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "error": false,
        "message": "User registered successfully",
    })))
}

async fn login(
    key: LoginKey,
    password: String,
    app_state: &AppState,
) -> Result<HttpResponse, AppError> {
    let pair = accounts::login(
        app_state.store.as_ref(),
        key,
        password,
        &app_state.security,
        SystemTime::now(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful",
        token: pair.access_token,
        refresh_token: pair.refresh_token,
    }))
}

async fn login_email(
    body: ValidatedJson<EmailLogin>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let EmailLogin { email, password } = body.into_inner();
    login(LoginKey::Email(email), password, &app_state).await
}

async fn login_username(
    body: ValidatedJson<UsernameLogin>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let UsernameLogin { username, password } = body.into_inner();
    login(LoginKey::Username(username), password, &app_state).await
}

/// Routes relative to `/api/auth`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login/emailpassword", web::post().to(login_email))
        .route("/login/usernamepassword", web::post().to(login_username));
}
