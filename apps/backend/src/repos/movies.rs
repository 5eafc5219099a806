//! Movie catalog records.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{from_document, from_documents, to_fields};
use crate::errors::DomainError;
use crate::store::{Collection, DocumentStore, Fields, Filter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovieStatus {
    Reported,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(default)]
    pub id: String,
    pub description: String,
    pub released_at: String,
    pub duration: f64,
    pub genre: String,
    pub language: String,
    pub created_by: String,
    pub avg_rating: f64,
    pub total_rating: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MovieStatus>,
    pub created_at: String,
    pub updated_at: String,
}

/// Partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoviePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

pub async fn create_movie(store: &dyn DocumentStore, movie: Movie) -> Result<Movie, DomainError> {
    let id = store.add(Collection::Movies, to_fields(&movie)?).await?;
    Ok(Movie { id, ..movie })
}

pub async fn find_movie(store: &dyn DocumentStore, id: &str) -> Result<Option<Movie>, DomainError> {
    store
        .get(Collection::Movies, id)
        .await?
        .map(from_document)
        .transpose()
}

pub async fn list_movies(store: &dyn DocumentStore) -> Result<Vec<Movie>, DomainError> {
    from_documents(store.query(Collection::Movies, &[]).await?)
}

pub async fn list_movies_by_creator(
    store: &dyn DocumentStore,
    creator_id: &str,
) -> Result<Vec<Movie>, DomainError> {
    from_documents(
        store
            .query(Collection::Movies, &[Filter::eq("created_by", creator_id)])
            .await?,
    )
}

pub async fn update_movie(
    store: &dyn DocumentStore,
    id: &str,
    patch: &MoviePatch,
    updated_at: &str,
) -> Result<(), DomainError> {
    let mut fields = to_fields(patch)?;
    fields.insert("updated_at".to_string(), json!(updated_at));
    store.update(Collection::Movies, id, fields).await
}

pub async fn set_rating_summary(
    store: &dyn DocumentStore,
    id: &str,
    avg_rating: f64,
    total_rating: u64,
) -> Result<(), DomainError> {
    let mut fields = Fields::new();
    fields.insert("avg_rating".to_string(), json!(avg_rating));
    fields.insert("total_rating".to_string(), json!(total_rating));
    store.update(Collection::Movies, id, fields).await
}

pub async fn mark_reported(store: &dyn DocumentStore, id: &str) -> Result<(), DomainError> {
    let mut fields = Fields::new();
    fields.insert("status".to_string(), json!(MovieStatus::Reported));
    store.update(Collection::Movies, id, fields).await
}
