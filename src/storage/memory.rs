//! In-memory document store
//!
//! Default store when no data directory is configured. Contents are lost on
//! restart.

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::errors::{StoreError, StoreResult};
use super::filter::Filter;
use super::object_id::ObjectId;
use super::{stamp_document, validate_collection_name, Document, DocumentStore};

/// Collections held in process memory, each in insertion order
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<BTreeMap<String, Vec<Document>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn create_document(&self, collection: &str, document: Document) -> StoreResult<ObjectId> {
        validate_collection_name(collection)?;
        let (id, document) = stamp_document(document);

        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(id)
    }

    fn get_documents(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> StoreResult<Vec<Document>> {
        validate_collection_name(collection)?;
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;

        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| filter.matches(doc))
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(collections.keys().cloned().collect())
    }
}
