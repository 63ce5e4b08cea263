//! Request validation errors
//!
//! A failed validation reports every violated field, not just the first. Each
//! violation carries a location path rooted at `"body"`, a human-readable
//! message and a machine-readable kind, e.g.
//!
//! ```json
//! {"loc": ["body", "questions", 2], "msg": "Input should be a valid string", "type": "string_type"}
//! ```

use std::fmt;

use serde::Serialize;

use super::types::FieldType;

/// One segment of a violation location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{}", name),
            PathSegment::Index(i) => write!(f, "{}", i),
        }
    }
}

/// Location of a value inside the request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The request body itself
    pub fn body() -> Self {
        Self(vec![PathSegment::Field("body".to_string())])
    }

    pub fn field(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Field(name.to_string()));
        Self(segments)
    }

    pub fn index(&self, i: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(i));
        Self(segments)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// A single validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub loc: FieldPath,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldViolation {
    pub fn new(loc: FieldPath, msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            loc,
            msg: msg.into(),
            kind: kind.into(),
        }
    }

    pub fn missing(loc: FieldPath) -> Self {
        Self::new(loc, "Field required", "missing")
    }

    pub fn type_mismatch(loc: FieldPath, expected: &FieldType) -> Self {
        match expected {
            FieldType::String => Self::new(loc, "Input should be a valid string", "string_type"),
            FieldType::Int { .. } => Self::new(loc, "Input should be a valid integer", "int_type"),
            FieldType::Array { .. } => Self::new(loc, "Input should be a valid list", "list_type"),
        }
    }

    pub fn below_minimum(loc: FieldPath, minimum: i64) -> Self {
        Self::new(
            loc,
            format!("Input should be greater than or equal to {}", minimum),
            "greater_than_equal",
        )
    }

    pub fn not_an_object() -> Self {
        Self::new(
            FieldPath::body(),
            "Input should be a valid dictionary or object to extract fields from",
            "model_attributes_type",
        )
    }

    pub fn invalid_json(reason: impl fmt::Display) -> Self {
        Self::new(
            FieldPath::body(),
            format!("JSON decode error: {}", reason),
            "json_invalid",
        )
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.loc, self.msg)
    }
}

/// All violations found in one request body
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(violation: FieldViolation) -> Self {
        Self(vec![violation])
    }

    pub fn push(&mut self, violation: FieldViolation) {
        self.0.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.0
    }

    /// Converts to `Err` when any violation was collected
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.len())?;
        for violation in &self.0 {
            write!(f, "; {}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_violation_serializes_with_mixed_location() {
        let loc = FieldPath::body().field("questions").index(2);
        let violation = FieldViolation::type_mismatch(loc, &FieldType::String);
        let json = serde_json::to_value(&violation).unwrap();
        assert_eq!(json["loc"], json!(["body", "questions", 2]));
        assert_eq!(json["type"], "string_type");
    }

    #[test]
    fn test_display_lists_each_violation() {
        let mut errors = ValidationErrors::new();
        errors.push(FieldViolation::missing(FieldPath::body().field("name")));
        errors.push(FieldViolation::below_minimum(
            FieldPath::body().field("question_index"),
            0,
        ));
        let display = errors.to_string();
        assert!(display.starts_with("2 validation error(s)"));
        assert!(display.contains("body.name: Field required"));
        assert!(display.contains("body.question_index"));
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());
        let errors = ValidationErrors::single(FieldViolation::not_an_object());
        assert_eq!(errors.into_result().unwrap_err().len(), 1);
    }
}
