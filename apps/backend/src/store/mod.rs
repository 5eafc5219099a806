//! Document store boundary.
//!
//! Records live in a schemaless document store: named collections of JSON
//! objects keyed by store-assigned ids. Handlers never talk to the store
//! directly; typed access goes through `crate::repos`.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::DomainError;

pub mod memory;

pub use memory::MemoryStore;

/// JSON object body of a document.
pub type Fields = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Movies,
    Ratings,
    Reports,
}

impl Collection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Movies => "movies",
            Collection::Ratings => "ratings",
            Collection::Reports => "reports",
        }
    }
}

/// A stored document and its id.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

/// Equality filter on a top-level field.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: &'static str,
    pub value: Value,
}

impl Filter {
    pub fn eq(field: &'static str, value: impl Into<Value>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    fn matches(&self, fields: &Fields) -> bool {
        fields.get(self.field) == Some(&self.value)
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, DomainError>;

    /// Insert a new document and return its assigned id.
    async fn add(&self, collection: Collection, fields: Fields) -> Result<String, DomainError>;

    /// Insert a new document unless an existing one in the collection has the
    /// same value for any of `unique`. The check and the insert are atomic.
    /// Fields are checked in order; the first collision fails with
    /// `Conflict(ConflictKind::Other(field))`. A field absent from `fields`
    /// is not checked.
    async fn add_unique(
        &self,
        collection: Collection,
        fields: Fields,
        unique: &[&'static str],
    ) -> Result<String, DomainError>;

    /// Merge `patch` into an existing document. Fails with `NotFound` if the
    /// document does not exist.
    async fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: Fields,
    ) -> Result<(), DomainError>;

    /// Delete a document. Deleting a missing document is not an error.
    async fn delete(&self, collection: Collection, id: &str) -> Result<(), DomainError>;

    /// All documents matching every filter, in id order.
    async fn query(
        &self,
        collection: Collection,
        filters: &[Filter],
    ) -> Result<Vec<Document>, DomainError>;
}
