use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::services::ratings;
use crate::state::app_state::AppState;
use crate::validation::{self, Body, FromBody};

#[derive(Debug)]
pub struct RateRequest {
    rating: u8,
}

impl FromBody for RateRequest {
    fn from_body(body: &Body) -> Result<Self, AppError> {
        let value = validation::int_in_range(
            validation::required_value(body, "rating", "Rating")?,
            1,
            5,
            "Rating must be an integer between 1 and 5",
        )?;
        let rating = u8::try_from(value)
            .map_err(|_| AppError::invalid("Rating must be an integer between 1 and 5"))?;
        Ok(Self { rating })
    }
}

async fn rate(
    user: CurrentUser,
    path: web::Path<String>,
    body: ValidatedJson<RateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let movie_id = validation::path_id(&path, "Movie ID")?;
    let summary =
        ratings::rate_movie(app_state.store.as_ref(), &movie_id, &user.id, body.rating).await?;

    Ok(HttpResponse::Ok().json(json!({
        "error": false,
        "message": "Rating added/updated successfully",
        "avg_rating": summary.avg_rating,
        "total_rating": summary.total_rating,
    })))
}

/// Routes relative to `/api/movie/rate`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{movie_id}", web::post().to(rate));
}
