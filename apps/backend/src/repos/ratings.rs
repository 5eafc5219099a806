//! Per-user movie ratings. At most one rating per (movie, user) pair is kept
//! by the rating service, which upserts through these functions.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{from_document, from_documents, to_fields};
use crate::errors::DomainError;
use crate::store::{Collection, DocumentStore, Fields, Filter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(default)]
    pub id: String,
    pub movie_id: String,
    pub user_id: String,
    pub rating: u8,
}

pub async fn find_user_rating(
    store: &dyn DocumentStore,
    movie_id: &str,
    user_id: &str,
) -> Result<Option<Rating>, DomainError> {
    store
        .query(
            Collection::Ratings,
            &[
                Filter::eq("movie_id", movie_id),
                Filter::eq("user_id", user_id),
            ],
        )
        .await?
        .into_iter()
        .next()
        .map(from_document)
        .transpose()
}

pub async fn insert_rating(store: &dyn DocumentStore, rating: Rating) -> Result<Rating, DomainError> {
    let id = store.add(Collection::Ratings, to_fields(&rating)?).await?;
    Ok(Rating { id, ..rating })
}

pub async fn set_rating_value(
    store: &dyn DocumentStore,
    id: &str,
    value: u8,
) -> Result<(), DomainError> {
    let mut fields = Fields::new();
    fields.insert("rating".to_string(), json!(value));
    store.update(Collection::Ratings, id, fields).await
}

pub async fn list_movie_ratings(
    store: &dyn DocumentStore,
    movie_id: &str,
) -> Result<Vec<Rating>, DomainError> {
    from_documents(
        store
            .query(Collection::Ratings, &[Filter::eq("movie_id", movie_id)])
            .await?,
    )
}
