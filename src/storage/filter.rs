//! # Document Filters
//!
//! Exact-equality filters for `get_documents`. An empty filter matches every
//! document.

use serde_json::{Map, Value};

/// A single `field == value` condition
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
    pub field: String,
    pub value: Value,
}

impl FieldMatch {
    fn matches(&self, doc: &Map<String, Value>) -> bool {
        doc.get(&self.field) == Some(&self.value)
    }
}

/// Conjunction of exact-equality conditions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<FieldMatch>,
}

impl Filter {
    /// Filter that matches every document
    pub fn all() -> Self {
        Self::default()
    }

    /// Adds a `field == value` condition
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push(FieldMatch {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Adds a string condition only when a non-empty value is supplied.
    ///
    /// Query parameters such as `?email=` with an empty value mean "no filter".
    pub fn eq_if_present(self, field: impl Into<String>, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.eq(field, v),
            _ => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Check if a document satisfies every condition
    pub fn matches(&self, doc: &Map<String, Value>) -> bool {
        self.conditions.iter().all(|c| c.matches(doc))
    }
}
