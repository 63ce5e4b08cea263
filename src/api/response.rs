//! # Response Formatting
//!
//! Response bodies for the interview API. Stored documents are reshaped before
//! leaving the service: the store's `_id` becomes a string `id`.

use serde::Serialize;
use serde_json::Value;

use crate::storage::{Document, ObjectId, ID_FIELD};

/// Response to every successful create
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedResponse {
    pub id: String,
    pub status: &'static str,
}

impl CreatedResponse {
    pub fn new(id: ObjectId) -> Self {
        Self {
            id: id.to_string(),
            status: "created",
        }
    }
}

/// Body of `GET /`
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of `GET /test`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticsResponse {
    pub backend: String,
    pub database: String,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl Default for DiagnosticsResponse {
    fn default() -> Self {
        Self {
            backend: "✅ Running".to_string(),
            database: "❌ Not Available".to_string(),
            database_url: None,
            database_name: None,
            connection_status: "Not Connected".to_string(),
            collections: Vec::new(),
        }
    }
}

/// Renames `_id` to `id` (as a string) and drops `_id`.
pub fn present_document(mut document: Document) -> Value {
    let id = match document.remove(ID_FIELD) {
        Some(Value::String(s)) => Value::String(s),
        Some(Value::Null) | None => Value::String("None".to_string()),
        Some(other) => Value::String(other.to_string()),
    };
    document.insert("id".to_string(), id);
    Value::Object(document)
}

/// Reports whether a setting is present, for diagnostics
pub fn presence_marker(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => "✅ Set".to_string(),
        _ => "❌ Not Set".to_string(),
    }
}

/// Truncates to at most `max` characters
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
