//! Schema type definitions
//!
//! Supported field types:
//! - string: UTF-8 string
//! - int: integer, optionally bounded below
//! - array: homogeneous array with element type

/// Supported field types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// Integer with an optional inclusive lower bound
    Int {
        minimum: Option<i64>,
    },
    /// Homogeneous array with single element type
    Array {
        element_type: Box<FieldType>,
    },
}

/// A named field in a request schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name as it appears in the JSON body
    pub name: String,
    /// Field data type
    pub field_type: FieldType,
    /// Whether the field must be present and non-null
    pub required: bool,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, field_type: FieldType, required: bool) -> Self {
        Self {
            name: name.into(),
            field_type,
            required,
        }
    }

    /// Create a required string field
    pub fn required_string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String, true)
    }

    /// Create an optional string field
    pub fn optional_string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String, false)
    }

    /// Create a required integer field with an inclusive lower bound
    pub fn required_int_at_least(name: impl Into<String>, minimum: i64) -> Self {
        Self::new(
            name,
            FieldType::Int {
                minimum: Some(minimum),
            },
            true,
        )
    }

    /// Create a required array field; `null` is a type error, not an empty list
    pub fn required_array(name: impl Into<String>, element_type: FieldType) -> Self {
        Self::new(
            name,
            FieldType::Array {
                element_type: Box::new(element_type),
            },
            true,
        )
    }
}

/// Declared shape of one request body.
///
/// Fields are validated in declaration order, which is also the order of
/// reported violations. Undeclared fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Schema name (the payload type)
    pub name: String,
    /// Field definitions in declaration order
    pub fields: Vec<FieldDef>,
}

impl Schema {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}
