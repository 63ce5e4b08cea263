//! API layer for interview-api
//!
//! Turns validated requests into document store calls and shapes responses.
//!
//! # Request flow
//!
//! 1. Body is validated against its schema (in the HTTP extractor)
//! 2. The service calls the store
//! 3. Documents are reshaped (`_id` → `id`) and returned as JSON
//!
//! # Supported Operations
//!
//! - create / list candidates
//! - create / list interviews (creating a placeholder candidate if needed)
//! - submit answers
//! - diagnostics

mod errors;
mod response;
mod service;

pub use errors::{ApiError, ApiResult, ErrorDetail, ErrorResponse};
pub use response::{
    present_document, truncate_chars, CreatedResponse, DiagnosticsResponse, MessageResponse,
};
pub use service::{
    CandidateLookup, DatabaseSettings, InterviewService, DIAGNOSTIC_COLLECTION_LIMIT,
    DIAGNOSTIC_ERROR_CHARS, LIST_LIMIT,
};
