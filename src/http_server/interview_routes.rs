//! Interview HTTP Routes
//!
//! Endpoints for candidates, interviews and answers. Mounted both at the root
//! and under `/api`. Store calls may hit the disk, so every service call runs
//! on the blocking thread pool.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tokio::task;

use crate::api::{ApiError, ApiResult, CreatedResponse, InterviewService};
use crate::schema::{CreateCandidate, CreateInterview, SubmitAnswer};

use super::extract::ValidatedJson;

// ==================
// Shared State
// ==================

/// State shared across interview and diagnostic handlers
pub struct InterviewState {
    pub service: InterviewService,
}

impl InterviewState {
    pub fn new(service: InterviewService) -> Self {
        Self { service }
    }

    /// Runs `op` against the service on the blocking pool
    pub async fn run<T, F>(&self, op: F) -> ApiResult<T>
    where
        F: FnOnce(InterviewService) -> ApiResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let service = self.service.clone();
        task::spawn_blocking(move || op(service))
            .await
            .map_err(|e| ApiError::TaskFailed(e.to_string()))?
    }
}

// ==================
// Query Types
// ==================

#[derive(Debug, Default, Deserialize)]
pub struct CandidateQuery {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InterviewQuery {
    #[serde(default)]
    pub candidate_email: Option<String>,
}

// ==================
// Interview Routes
// ==================

/// Create candidate, interview and answer routes
pub fn interview_routes(state: Arc<InterviewState>) -> Router {
    Router::new()
        .route(
            "/candidates",
            get(list_candidates_handler).post(create_candidate_handler),
        )
        .route(
            "/interviews",
            get(list_interviews_handler).post(create_interview_handler),
        )
        .route("/answers", post(submit_answer_handler))
        .with_state(state)
}

// ==================
// Candidate Handlers
// ==================

async fn create_candidate_handler(
    State(state): State<Arc<InterviewState>>,
    ValidatedJson(payload): ValidatedJson<CreateCandidate>,
) -> ApiResult<Json<CreatedResponse>> {
    let created = state
        .run(move |service| service.create_candidate(payload))
        .await?;
    Ok(Json(created))
}

async fn list_candidates_handler(
    State(state): State<Arc<InterviewState>>,
    Query(query): Query<CandidateQuery>,
) -> ApiResult<Json<Vec<Value>>> {
    let candidates = state
        .run(move |service| service.list_candidates(query.email.as_deref()))
        .await?;
    Ok(Json(candidates))
}

// ==================
// Interview Handlers
// ==================

async fn create_interview_handler(
    State(state): State<Arc<InterviewState>>,
    ValidatedJson(payload): ValidatedJson<CreateInterview>,
) -> ApiResult<Json<CreatedResponse>> {
    let created = state
        .run(move |service| service.create_interview(payload))
        .await?;
    Ok(Json(created))
}

async fn list_interviews_handler(
    State(state): State<Arc<InterviewState>>,
    Query(query): Query<InterviewQuery>,
) -> ApiResult<Json<Vec<Value>>> {
    let interviews = state
        .run(move |service| service.list_interviews(query.candidate_email.as_deref()))
        .await?;
    Ok(Json(interviews))
}

// ==================
// Answer Handlers
// ==================

async fn submit_answer_handler(
    State(state): State<Arc<InterviewState>>,
    ValidatedJson(payload): ValidatedJson<SubmitAnswer>,
) -> ApiResult<Json<CreatedResponse>> {
    let created = state
        .run(move |service| service.submit_answer(payload))
        .await?;
    Ok(Json(created))
}
