//! Rating upsert and aggregate recomputation.
//!
//! The sequence is read-modify-write over separate store calls: two callers
//! rating the same movie at once can each write a summary that misses the
//! other's rating. The next rating of that movie repairs it.

use serde::Serialize;
use tracing::info;

use crate::error::AppError;
use crate::repos::movies;
use crate::repos::ratings::{self, Rating};
use crate::services::catalog::get_movie;
use crate::store::DocumentStore;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingSummary {
    pub avg_rating: f64,
    pub total_rating: u64,
}

/// Mean rounded to two decimals, and the count. No ratings is `0.0` / `0`.
pub fn summarize(values: &[u8]) -> RatingSummary {
    if values.is_empty() {
        return RatingSummary {
            avg_rating: 0.0,
            total_rating: 0,
        };
    }

    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    let mean = sum as f64 / values.len() as f64;
    RatingSummary {
        avg_rating: (mean * 100.0).round() / 100.0,
        total_rating: values.len() as u64,
    }
}

/// Record `user_id`'s rating of a movie, replacing any earlier one, then
/// rewrite the movie's summary from all of its ratings.
pub async fn rate_movie(
    store: &dyn DocumentStore,
    movie_id: &str,
    user_id: &str,
    value: u8,
) -> Result<RatingSummary, AppError> {
    get_movie(store, movie_id).await?;

    match ratings::find_user_rating(store, movie_id, user_id).await? {
        Some(existing) => ratings::set_rating_value(store, &existing.id, value).await?,
        None => {
            ratings::insert_rating(
                store,
                Rating {
                    id: String::new(),
                    movie_id: movie_id.to_string(),
                    user_id: user_id.to_string(),
                    rating: value,
                },
            )
            .await?;
        }
    }

    let values: Vec<u8> = ratings::list_movie_ratings(store, movie_id)
        .await?
        .into_iter()
        .map(|r| r.rating)
        .collect();
    let summary = summarize(&values);

    movies::set_rating_summary(store, movie_id, summary.avg_rating, summary.total_rating).await?;
    info!(
        movie_id,
        avg_rating = summary.avg_rating,
        total_rating = summary.total_rating,
        "Movie rating updated"
    );
    Ok(summary)
}
