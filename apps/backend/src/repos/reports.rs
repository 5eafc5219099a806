//! Content reports filed against movies.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{from_document, from_documents, to_fields};
use crate::errors::DomainError;
use crate::store::{Collection, DocumentStore, Fields};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Approved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub id: String,
    pub movie_id: String,
    pub user_id: String,
    pub reason: String,
    pub status: ReportStatus,
    pub created_at: String,
}

pub async fn create_report(store: &dyn DocumentStore, report: Report) -> Result<Report, DomainError> {
    let id = store.add(Collection::Reports, to_fields(&report)?).await?;
    Ok(Report { id, ..report })
}

pub async fn find_report(store: &dyn DocumentStore, id: &str) -> Result<Option<Report>, DomainError> {
    store
        .get(Collection::Reports, id)
        .await?
        .map(from_document)
        .transpose()
}

pub async fn list_reports(store: &dyn DocumentStore) -> Result<Vec<Report>, DomainError> {
    from_documents(store.query(Collection::Reports, &[]).await?)
}

pub async fn set_report_status(
    store: &dyn DocumentStore,
    id: &str,
    status: ReportStatus,
) -> Result<(), DomainError> {
    let mut fields = Fields::new();
    fields.insert("status".to_string(), json!(status));
    store.update(Collection::Reports, id, fields).await
}

pub async fn delete_report(store: &dyn DocumentStore, id: &str) -> Result<(), DomainError> {
    store.delete(Collection::Reports, id).await
}
