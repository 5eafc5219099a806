//! Movie catalog operations.

use tracing::info;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::movies::{self, Movie, MoviePatch};
use crate::repos::reports::{self, Report, ReportStatus};
use crate::services::now_rfc3339;
use crate::store::DocumentStore;

#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub description: String,
    pub released_at: String,
    pub duration: f64,
    pub genre: String,
    pub language: String,
}

fn movie_not_found() -> AppError {
    AppError::not_found(ErrorCode::MovieNotFound, "Movie not found")
}

/// Add a movie owned by `creator_id` with an empty rating summary.
pub async fn create_movie(
    store: &dyn DocumentStore,
    creator_id: &str,
    new: NewMovie,
) -> Result<Movie, AppError> {
    let now = now_rfc3339()?;
    let movie = movies::create_movie(
        store,
        Movie {
            id: String::new(),
            description: new.description,
            released_at: new.released_at,
            duration: new.duration,
            genre: new.genre,
            language: new.language,
            created_by: creator_id.to_string(),
            avg_rating: 0.0,
            total_rating: 0,
            status: None,
            created_at: now.clone(),
            updated_at: now,
        },
    )
    .await?;

    info!(movie_id = %movie.id, created_by = creator_id, "Movie created");
    Ok(movie)
}

pub async fn get_movie(store: &dyn DocumentStore, id: &str) -> Result<Movie, AppError> {
    movies::find_movie(store, id)
        .await?
        .ok_or_else(movie_not_found)
}

pub async fn list_movies(store: &dyn DocumentStore) -> Result<Vec<Movie>, AppError> {
    Ok(movies::list_movies(store).await?)
}

pub async fn list_movies_by(
    store: &dyn DocumentStore,
    creator_id: &str,
) -> Result<Vec<Movie>, AppError> {
    Ok(movies::list_movies_by_creator(store, creator_id).await?)
}

/// Apply a partial update. Only the movie's creator may update it.
pub async fn update_movie(
    store: &dyn DocumentStore,
    caller_id: &str,
    id: &str,
    patch: MoviePatch,
) -> Result<(), AppError> {
    let movie = get_movie(store, id).await?;
    if movie.created_by != caller_id {
        return Err(AppError::forbidden_with_code(
            ErrorCode::NotResourceOwner,
            "You are not authorized to update this movie",
        ));
    }

    movies::update_movie(store, id, &patch, &now_rfc3339()?).await?;
    info!(movie_id = id, "Movie updated");
    Ok(())
}

/// File a pending report against an existing movie.
pub async fn report_movie(
    store: &dyn DocumentStore,
    caller_id: &str,
    movie_id: &str,
    reason: String,
) -> Result<Report, AppError> {
    get_movie(store, movie_id).await?;

    let report = reports::create_report(
        store,
        Report {
            id: String::new(),
            movie_id: movie_id.to_string(),
            user_id: caller_id.to_string(),
            reason,
            status: ReportStatus::Pending,
            created_at: now_rfc3339()?,
        },
    )
    .await?;

    info!(report_id = %report.id, movie_id, "Movie reported");
    Ok(report)
}
