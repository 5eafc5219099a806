use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;
use ulid::Ulid;

use super::{Collection, Document, DocumentStore, Fields, Filter};
use crate::errors::domain::{ConflictKind, NotFoundKind};
use crate::errors::DomainError;

/// In-process document store with ULID document ids.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, BTreeMap<String, Fields>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(collection: Collection, id: &str) -> DomainError {
    let kind = match collection {
        Collection::Users => NotFoundKind::User,
        Collection::Movies => NotFoundKind::Movie,
        Collection::Reports => NotFoundKind::Report,
        Collection::Ratings => NotFoundKind::Other("rating".to_string()),
    };
    DomainError::not_found(kind, format!("{} {id} not found", collection.as_str()))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, DomainError> {
        let guard = self.collections.read();
        Ok(guard
            .get(&collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document {
                id: id.to_string(),
                fields: fields.clone(),
            }))
    }

    async fn add(&self, collection: Collection, fields: Fields) -> Result<String, DomainError> {
        let id = Ulid::new().to_string();
        self.collections
            .write()
            .entry(collection)
            .or_default()
            .insert(id.clone(), fields);
        Ok(id)
    }

    async fn add_unique(
        &self,
        collection: Collection,
        fields: Fields,
        unique: &[&'static str],
    ) -> Result<String, DomainError> {
        let mut guard = self.collections.write();
        let docs = guard.entry(collection).or_default();

        for &field in unique {
            let Some(value) = fields.get(field) else {
                continue;
            };
            if docs.values().any(|existing| existing.get(field) == Some(value)) {
                return Err(DomainError::conflict(
                    ConflictKind::Other(field.to_string()),
                    format!("{} with this {field} already exists", collection.as_str()),
                ));
            }
        }

        let id = Ulid::new().to_string();
        docs.insert(id.clone(), fields);
        Ok(id)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: Fields,
    ) -> Result<(), DomainError> {
        let mut guard = self.collections.write();
        let doc = guard
            .get_mut(&collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| not_found(collection, id))?;

        for (key, value) in patch {
            doc.insert(key, value);
        }
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), DomainError> {
        if let Some(docs) = self.collections.write().get_mut(&collection) {
            docs.remove(id);
        }
        Ok(())
    }

    async fn query(
        &self,
        collection: Collection,
        filters: &[Filter],
    ) -> Result<Vec<Document>, DomainError> {
        let guard = self.collections.read();
        let Some(docs) = guard.get(&collection) else {
            return Ok(Vec::new());
        };

        Ok(docs
            .iter()
            .filter(|(_, fields)| filters.iter().all(|f| f.matches(fields)))
            .map(|(id, fields)| Document {
                id: id.clone(),
                fields: fields.clone(),
            })
            .collect())
    }
}
