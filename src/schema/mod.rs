//! Schema definitions for interview-api
//!
//! Declares the shape of every persisted document and every request body.
//! Schemas are used to validate requests only; the document store itself
//! accepts any JSON object.
//!
//! # Design Principles
//!
//! - Validation runs before any handler logic
//! - All violations are reported together
//! - No coercion between JSON types
//! - Undeclared request fields are ignored

mod errors;
mod models;
mod types;
mod validator;

pub use errors::{FieldPath, FieldViolation, PathSegment, ValidationErrors};
pub use models::{
    display_name_from_email, title_case, Answer, Candidate, Collection, CreateCandidate,
    CreateInterview, Interview, InterviewStatus, RequestSchema, SubmitAnswer,
};
pub use types::{FieldDef, FieldType, Schema};
pub use validator::SchemaValidator;
