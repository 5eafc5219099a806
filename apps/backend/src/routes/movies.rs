use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::repos::movies::MoviePatch;
use crate::services::catalog::{self, NewMovie};
use crate::state::app_state::AppState;
use crate::validation::{self, Body, FromBody};

const DURATION_NAN: &str = "Duration must be a number";

fn release_date(value: &serde_json::Value) -> Result<String, AppError> {
    match value.as_str().map(str::trim) {
        Some(s) if validation::is_iso8601(s) => Ok(s.to_string()),
        _ => Err(AppError::invalid("Invalid date format")),
    }
}

impl FromBody for NewMovie {
    fn from_body(body: &Body) -> Result<Self, AppError> {
        let description = validation::required_str(body, "description", "Description")?;
        let released_at =
            release_date(validation::required_value(body, "released_at", "Release date")?)?;
        let duration = validation::number(
            validation::required_value(body, "duration", "Duration")?,
            DURATION_NAN,
        )?;
        let genre = validation::required_str(body, "genre", "Genre")?;
        let language = validation::required_str(body, "language", "Language")?;

        Ok(Self {
            description,
            released_at,
            duration,
            genre,
            language,
        })
    }
}

impl FromBody for MoviePatch {
    fn from_body(body: &Body) -> Result<Self, AppError> {
        let description = validation::optional_str(body, "description", "Description")?;
        let released_at = match body.get("released_at") {
            None | Some(serde_json::Value::Null) => None,
            Some(value) => Some(release_date(value)?),
        };
        let duration = match body.get("duration") {
            None | Some(serde_json::Value::Null) => None,
            Some(value) => Some(validation::number(value, DURATION_NAN)?),
        };
        let genre = validation::optional_str(body, "genre", "Genre")?;
        let language = validation::optional_str(body, "language", "Language")?;

        Ok(Self {
            description,
            released_at,
            duration,
            genre,
            language,
        })
    }
}

#[derive(Debug)]
pub struct ReportRequest {
    reason: String,
}

impl FromBody for ReportRequest {
    fn from_body(body: &Body) -> Result<Self, AppError> {
        let reason = validation::required_str(body, "reason", "Reason")?;
        validation::length_between(
            &reason,
            5,
            255,
            "Reason must be between 5 and 255 characters long",
        )?;
        Ok(Self { reason })
    }
}

async fn create(
    user: CurrentUser,
    body: ValidatedJson<NewMovie>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let movie = catalog::create_movie(app_state.store.as_ref(), &user.id, body.into_inner()).await?;

    Ok(HttpResponse::Created().json(json!({
        "error": false,
        "message": "Movie created successfully",
        "movieId": movie.id,
    })))
}

async fn list_all(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let movies = catalog::list_movies(app_state.store.as_ref()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "error": false,
        "message": "Movies retrieved successfully",
        "movies": movies,
    })))
}

async fn list_mine(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let movies = catalog::list_movies_by(app_state.store.as_ref(), &user.id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "error": false,
        "message": "Your movies retrieved successfully",
        "movies": movies,
    })))
}

async fn details(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = validation::path_id(&path, "Movie ID")?;
    let movie = catalog::get_movie(app_state.store.as_ref(), &id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "error": false,
        "message": "Movie details retrieved successfully",
        "movie": movie,
    })))
}

async fn update(
    user: CurrentUser,
    path: web::Path<String>,
    body: ValidatedJson<MoviePatch>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = validation::path_id(&path, "Movie ID")?;
    catalog::update_movie(app_state.store.as_ref(), &user.id, &id, body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "error": false,
        "message": "Movie updated successfully",
    })))
}

async fn report(
    user: CurrentUser,
    path: web::Path<String>,
    body: ValidatedJson<ReportRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let movie_id = validation::path_id(&path, "Movie ID")?;
    let ReportRequest { reason } = body.into_inner();
    catalog::report_movie(app_state.store.as_ref(), &user.id, &movie_id, reason).await?;

    Ok(HttpResponse::Created().json(json!({
        "error": false,
        "message": "Movie reported successfully",
    })))
}

/// Routes relative to `/api/movie`. Fixed paths are registered before
/// `/{id}` so they are never captured as an id.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/create", web::post().to(create))
        .route("/all", web::get().to(list_all))
        .route("/my-movies", web::get().to(list_mine))
        .route("/update/{id}", web::put().to(update))
        .route("/report/{movie_id}", web::post().to(report))
        .route("/{id}", web::get().to(details));
}
