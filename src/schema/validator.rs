//! Request body validator
//!
//! Validation semantics:
//! - The body must be a JSON object
//! - Required fields must be present and non-null
//! - Optional fields may be absent or null
//! - Types must match exactly; no coercion (`"3"` is not an int, `3.0` is not an int)
//! - Integer lower bounds are inclusive
//! - Undeclared fields are ignored
//!
//! Every violation is collected before returning, so a client sees all of its
//! mistakes in one response.

use serde_json::{Map, Value};

use super::errors::{FieldPath, FieldViolation, ValidationErrors};
use super::types::{FieldType, Schema};

/// Validates request bodies against a declared [`Schema`].
///
/// The validator does not mutate the body.
pub struct SchemaValidator<'a> {
    schema: &'a Schema,
}

impl<'a> SchemaValidator<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Validates a decoded request body.
    ///
    /// # Errors
    ///
    /// Returns every [`FieldViolation`] found, in field declaration order.
    pub fn validate(&self, body: &Value) -> Result<(), ValidationErrors> {
        let obj = match body.as_object() {
            Some(obj) => obj,
            None => return Err(ValidationErrors::single(FieldViolation::not_an_object())),
        };

        let mut errors = ValidationErrors::new();
        self.validate_object(obj, &FieldPath::body(), &mut errors);
        errors.into_result()
    }

    fn validate_object(&self, obj: &Map<String, Value>, path: &FieldPath, errors: &mut ValidationErrors) {
        for field in &self.schema.fields {
            let field_path = path.field(&field.name);

            match obj.get(&field.name) {
                None | Some(Value::Null) if !field.required => {}
                None => errors.push(FieldViolation::missing(field_path)),
                Some(value) => validate_value(value, &field.field_type, &field_path, errors),
            }
        }
    }
}

/// Validates a value against a field type.
fn validate_value(
    value: &Value,
    expected: &FieldType,
    path: &FieldPath,
    errors: &mut ValidationErrors,
) {
    match expected {
        FieldType::String => {
            if !value.is_string() {
                errors.push(FieldViolation::type_mismatch(path.clone(), expected));
            }
        }
        FieldType::Int { minimum } => {
            let as_int = if let Some(n) = value.as_i64() {
                Some(n as i128)
            } else {
                value.as_u64().map(|n| n as i128)
            };

            match (as_int, minimum) {
                (None, _) => errors.push(FieldViolation::type_mismatch(path.clone(), expected)),
                (Some(n), Some(min)) if n < *min as i128 => {
                    errors.push(FieldViolation::below_minimum(path.clone(), *min))
                }
                _ => {}
            }
        }
        FieldType::Array { element_type } => match value.as_array() {
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    validate_value(item, element_type, &path.index(i), errors);
                }
            }
            None => errors.push(FieldViolation::type_mismatch(path.clone(), expected)),
        },
    }
}
