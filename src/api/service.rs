//! # Interview Service
//!
//! Translates validated requests into document store calls and shapes the
//! results. HTTP handlers are thin wrappers around these methods.
//!
//! The service holds an optional store handle. Without one, diagnostics still
//! work and every entity operation fails with a server error.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::schema::{
    Answer, Candidate, Collection, CreateCandidate, CreateInterview, Interview, SubmitAnswer,
};
use crate::storage::{to_document, DocumentStore, Filter, ObjectId, StoreError, StoreResult};

use super::errors::{ApiError, ApiResult};
use super::response::{
    present_document, presence_marker, truncate_chars, CreatedResponse, DiagnosticsResponse,
};

/// Maximum documents returned by a list operation
pub const LIST_LIMIT: usize = 50;

/// Maximum collection names reported by diagnostics
pub const DIAGNOSTIC_COLLECTION_LIMIT: usize = 10;

/// Maximum length of a store error echoed by diagnostics
pub const DIAGNOSTIC_ERROR_CHARS: usize = 80;

/// Outcome of [`InterviewService::ensure_candidate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateLookup {
    /// A candidate with the email already existed; nothing was written
    Existing,
    /// A placeholder candidate was inserted with this identifier
    Created(ObjectId),
}

/// Connection settings shown (never parsed) by diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub name: Option<String>,
}

/// Candidate, interview and answer operations over a document store
#[derive(Clone)]
pub struct InterviewService {
    store: Option<Arc<dyn DocumentStore>>,
    settings: DatabaseSettings,
}

impl InterviewService {
    /// Create a service backed by `store`
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store: Some(store),
            settings: DatabaseSettings::default(),
        }
    }

    /// Create a service with no store; entity operations fail
    pub fn unavailable() -> Self {
        Self {
            store: None,
            settings: DatabaseSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: DatabaseSettings) -> Self {
        self.settings = settings;
        self
    }

    fn store(&self) -> StoreResult<&dyn DocumentStore> {
        self.store.as_deref().ok_or(StoreError::Unavailable)
    }

    // ==================
    // Candidates
    // ==================

    /// Inserts a candidate. Email uniqueness is not checked.
    pub fn create_candidate(&self, payload: CreateCandidate) -> ApiResult<CreatedResponse> {
        let candidate = Candidate::from(payload);
        let id = self.insert(Candidate::COLLECTION, &candidate)?;
        info!(candidate_id = %id, email = %candidate.email, "candidate created");
        Ok(CreatedResponse::new(id))
    }

    /// Lists up to [`LIST_LIMIT`] candidates, optionally with an exact email
    pub fn list_candidates(&self, email: Option<&str>) -> ApiResult<Vec<Value>> {
        let filter = Filter::all().eq_if_present("email", email);
        self.list(Candidate::COLLECTION, &filter)
    }

    /// Makes sure a candidate with `email` exists, inserting a placeholder
    /// named after the email's local part when none does.
    ///
    /// This is a lookup followed by a separate insert, not an atomic
    /// operation. Two concurrent calls for the same unknown email can both
    /// insert, and if a later step of the caller fails the inserted candidate
    /// stays behind.
    pub fn ensure_candidate(&self, email: &str) -> ApiResult<CandidateLookup> {
        let store = self.store()?;
        let existing = store
            .get_documents(Candidate::COLLECTION, &Filter::all().eq("email", email), 1)
            .map_err(|e| self.store_failure("candidate lookup", e))?;

        if !existing.is_empty() {
            return Ok(CandidateLookup::Existing);
        }

        let candidate = Candidate::from_email(email);
        let id = self.insert(Candidate::COLLECTION, &candidate)?;
        info!(candidate_id = %id, email = %email, name = %candidate.name, "candidate auto-created");
        Ok(CandidateLookup::Created(id))
    }

    // ==================
    // Interviews
    // ==================

    /// Ensures the candidate exists, then inserts the interview as `scheduled`.
    ///
    /// A failure in either step is reported the same way, and a candidate
    /// created by the first step is not rolled back.
    pub fn create_interview(&self, payload: CreateInterview) -> ApiResult<CreatedResponse> {
        self.ensure_candidate(&payload.candidate_email)?;

        let interview = Interview::from(payload);
        let id = self.insert(Interview::COLLECTION, &interview)?;
        info!(
            interview_id = %id,
            candidate_email = %interview.candidate_email,
            questions = interview.questions.len(),
            "interview created"
        );
        Ok(CreatedResponse::new(id))
    }

    /// Lists up to [`LIST_LIMIT`] interviews, optionally for one candidate
    pub fn list_interviews(&self, candidate_email: Option<&str>) -> ApiResult<Vec<Value>> {
        let filter = Filter::all().eq_if_present("candidate_email", candidate_email);
        self.list(Interview::COLLECTION, &filter)
    }

    // ==================
    // Answers
    // ==================

    /// Records an answer.
    ///
    /// `interview_id` must be a well-formed identifier; whether the interview
    /// exists is not checked.
    pub fn submit_answer(&self, payload: SubmitAnswer) -> ApiResult<CreatedResponse> {
        if !ObjectId::is_valid(&payload.interview_id) {
            warn!(interview_id = %payload.interview_id, "rejected answer with malformed interview_id");
            return Err(ApiError::InvalidInterviewId);
        }

        let answer = Answer::from(payload);
        let id = self.insert(Answer::COLLECTION, &answer)?;
        info!(
            answer_id = %id,
            interview_id = %answer.interview_id,
            question_index = answer.question_index,
            "answer recorded"
        );
        Ok(CreatedResponse::new(id))
    }

    // ==================
    // Diagnostics
    // ==================

    /// Reports backend and store health. Never fails: store errors are
    /// rendered into the `database` field.
    pub fn diagnostics(&self) -> DiagnosticsResponse {
        let mut response = DiagnosticsResponse::default();

        let store = match &self.store {
            Some(store) => store,
            None => {
                response.database = "⚠️ Available but not initialized".to_string();
                return response;
            }
        };

        response.database = "✅ Available".to_string();
        response.database_url = Some(presence_marker(self.settings.url.as_deref()));
        response.database_name = Some(presence_marker(self.settings.name.as_deref()));
        response.connection_status = "Connected".to_string();

        match store.list_collection_names() {
            Ok(mut names) => {
                names.truncate(DIAGNOSTIC_COLLECTION_LIMIT);
                response.collections = names;
                response.database = "✅ Connected & Working".to_string();
            }
            Err(e) => {
                warn!(error = %e, "diagnostics could not list collections");
                response.database = format!(
                    "⚠️ Connected but Error: {}",
                    truncate_chars(&e.to_string(), DIAGNOSTIC_ERROR_CHARS)
                );
            }
        }

        response
    }

    // ==================
    // Helpers
    // ==================

    fn insert<T: serde::Serialize>(&self, collection: &str, value: &T) -> ApiResult<ObjectId> {
        let store = self.store()?;
        let document = to_document(value)?;
        store
            .create_document(collection, document)
            .map_err(|e| self.store_failure(collection, e))
    }

    fn list(&self, collection: &str, filter: &Filter) -> ApiResult<Vec<Value>> {
        let store = self.store()?;
        let documents = store
            .get_documents(collection, filter, LIST_LIMIT)
            .map_err(|e| self.store_failure(collection, e))?;

        debug!(
            collection,
            filtered = !filter.is_empty(),
            count = documents.len(),
            "listed documents"
        );
        Ok(documents.into_iter().map(present_document).collect())
    }

    fn store_failure(&self, operation: &str, err: StoreError) -> ApiError {
        if err.is_corruption() {
            error!(operation, error = %err, "stored data failed integrity check");
        } else {
            error!(operation, error = %err, "store operation failed");
        }
        ApiError::Store(err)
    }
}
