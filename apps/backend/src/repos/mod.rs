//! Typed repositories over the document store.
//!
//! Each model carries its document id in an `id` field that is filled from
//! the store on read and stripped before write.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::errors::domain::InfraErrorKind;
use crate::errors::DomainError;
use crate::store::{Document, Fields};

pub mod movies;
pub mod ratings;
pub mod reports;
pub mod users;

pub(crate) fn to_fields<T: Serialize>(value: &T) -> Result<Fields, DomainError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(mut map)) => {
            map.remove("id");
            Ok(map)
        }
        Ok(other) => Err(DomainError::infra(
            InfraErrorKind::Other("serialize".to_string()),
            format!("expected a JSON object, got {other}"),
        )),
        Err(e) => Err(DomainError::infra(
            InfraErrorKind::Other("serialize".to_string()),
            e.to_string(),
        )),
    }
}

pub(crate) fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T, DomainError> {
    let Document { id, mut fields } = doc;
    fields.insert("id".to_string(), Value::String(id.clone()));

    serde_json::from_value(Value::Object(fields)).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("document {id} does not match its model: {e}"),
        )
    })
}

pub(crate) fn from_documents<T: DeserializeOwned>(
    docs: Vec<Document>,
) -> Result<Vec<T>, DomainError> {
    docs.into_iter().map(from_document).collect()
}
