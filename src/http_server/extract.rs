//! Validating JSON extractor
//!
//! `ValidatedJson<T>` decodes the body, checks it against `T::schema()` and
//! only then deserializes. Any failure is a 422 listing the violations, so
//! handlers never see a malformed payload.

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::api::ApiError;
use crate::schema::{FieldViolation, RequestSchema, ValidationErrors};

/// JSON body validated against its declared schema
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + RequestSchema,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            ApiError::Validation(ValidationErrors::single(FieldViolation::invalid_json(
                rejection.body_text(),
            )))
        })?;

        decode_validated(&bytes).map(ValidatedJson)
    }
}

/// Decodes, validates and deserializes a request body.
pub fn decode_validated<T>(bytes: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned + RequestSchema,
{
    let value: Value = serde_json::from_slice(bytes).map_err(|e| {
        debug!(error = %e, "request body is not valid JSON");
        ApiError::Validation(ValidationErrors::single(FieldViolation::invalid_json(e)))
    })?;

    T::validate(&value).map_err(|errors| {
        debug!(%errors, "request body failed validation");
        ApiError::Validation(errors)
    })?;

    // The schema mirrors the payload type, so this only fails if they drift
    serde_json::from_value(value).map_err(|e| {
        ApiError::Validation(ValidationErrors::single(FieldViolation::invalid_json(e)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CreateCandidate, SubmitAnswer};

    fn violation_kinds(err: ApiError) -> Vec<String> {
        match err {
            ApiError::Validation(errors) => errors
                .violations()
                .iter()
                .map(|v| v.kind.clone())
                .collect(),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_body_decodes() {
        let payload: CreateCandidate =
            decode_validated(br#"{"name": "Ada", "email": "ada@example.com"}"#).unwrap();
        assert_eq!(payload.name, "Ada");
        assert!(payload.role.is_none());
    }

    #[test]
    fn test_invalid_json() {
        let err = decode_validated::<CreateCandidate>(b"{not json").unwrap_err();
        assert_eq!(violation_kinds(err), vec!["json_invalid"]);
    }

    #[test]
    fn test_empty_body() {
        let err = decode_validated::<CreateCandidate>(b"").unwrap_err();
        assert_eq!(violation_kinds(err), vec!["json_invalid"]);
    }

    #[test]
    fn test_negative_question_index() {
        let err = decode_validated::<SubmitAnswer>(
            br#"{"interview_id": "507f1f77bcf86cd799439011", "question_index": -2, "transcript": "t"}"#,
        )
        .unwrap_err();
        assert_eq!(violation_kinds(err), vec!["greater_than_equal"]);
    }
}
