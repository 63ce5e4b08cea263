//! Document store for interview-api
//!
//! Documents live in named collections, one collection per entity type. The
//! API layer consumes only the [`DocumentStore`] contract:
//!
//! - `create_document` inserts one document and returns its new identifier
//! - `get_documents` returns up to `limit` documents matching an exact filter,
//!   in insertion order
//! - `list_collection_names` reports existing collections (diagnostics only)
//!
//! # Stored shape
//!
//! Every inserted document gains three fields: `_id` (identifier as a hex
//! string), `created_at` and `updated_at` (RFC 3339, UTC). Callers never set
//! these themselves.
//!
//! The store performs no schema checks and enforces no uniqueness.

mod checksum;
mod errors;
mod file;
mod filter;
mod memory;
mod object_id;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

pub use checksum::{compute_checksum, verify_checksum};
pub use errors::{StoreError, StoreResult};
pub use file::FileDocumentStore;
pub use filter::{FieldMatch, Filter};
pub use memory::InMemoryDocumentStore;
pub use object_id::{ObjectId, ParseObjectIdError, OBJECT_ID_HEX_LEN};

/// A stored document
pub type Document = Map<String, Value>;

/// Field holding a document's identifier inside the store
pub const ID_FIELD: &str = "_id";
pub const CREATED_AT_FIELD: &str = "created_at";
pub const UPDATED_AT_FIELD: &str = "updated_at";

/// Collection-per-entity document store
pub trait DocumentStore: Send + Sync {
    /// Inserts a document and returns its freshly generated identifier
    fn create_document(&self, collection: &str, document: Document) -> StoreResult<ObjectId>;

    /// Returns up to `limit` matching documents in insertion order
    fn get_documents(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> StoreResult<Vec<Document>>;

    /// Names of collections that hold at least one document, sorted
    fn list_collection_names(&self) -> StoreResult<Vec<String>>;
}

/// Serializes a typed model into a storable document
pub fn to_document<T: Serialize>(value: &T) -> StoreResult<Document> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::NotAnObject),
    }
}

/// Checks that a collection name is non-empty and made of `[a-z0-9_]`.
///
/// The file-backed store uses collection names as file stems.
pub fn validate_collection_name(name: &str) -> StoreResult<()> {
    let valid = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidCollection(name.to_string()))
    }
}

/// Assigns an identifier and timestamps to a document about to be inserted.
pub(crate) fn stamp_document(mut document: Document) -> (ObjectId, Document) {
    let now = Utc::now();
    let id = ObjectId::at(now);
    let timestamp = Value::String(now.to_rfc3339_opts(SecondsFormat::Micros, true));

    document.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    document.insert(CREATED_AT_FIELD.to_string(), timestamp.clone());
    document.insert(UPDATED_AT_FIELD.to_string(), timestamp);
    (id, document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Note {
        text: String,
    }

    #[test]
    fn test_to_document_from_struct() {
        let doc = to_document(&Note {
            text: "hello".into(),
        })
        .unwrap();
        assert_eq!(doc.get("text"), Some(&json!("hello")));
    }

    #[test]
    fn test_to_document_rejects_non_objects() {
        let result = to_document(&vec![1, 2, 3]);
        assert!(matches!(result, Err(StoreError::NotAnObject)));
    }

    #[test]
    fn test_collection_names() {
        assert!(validate_collection_name("candidate").is_ok());
        assert!(validate_collection_name("interview_v2").is_ok());
        assert!(validate_collection_name("").is_err());
        assert!(validate_collection_name("../etc").is_err());
        assert!(validate_collection_name("Candidate").is_err());
    }

    #[test]
    fn test_stamp_document_sets_reserved_fields() {
        let (id, doc) = stamp_document(Document::new());
        assert_eq!(doc.get(ID_FIELD), Some(&json!(id.to_string())));
        assert!(doc.get(CREATED_AT_FIELD).and_then(Value::as_str).is_some());
        assert_eq!(doc.get(CREATED_AT_FIELD), doc.get(UPDATED_AT_FIELD));
    }
}
