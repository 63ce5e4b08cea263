//! Diagnostic HTTP Routes
//!
//! `GET /` answers with a fixed message. `GET /test` reports backend and store
//! health and never fails.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use tracing::error;

use crate::api::{truncate_chars, DiagnosticsResponse, MessageResponse, DIAGNOSTIC_ERROR_CHARS};

use super::interview_routes::InterviewState;

/// Message returned by `GET /`
pub const ROOT_MESSAGE: &str = "Avatar Interview SaaS Backend Running";

/// Create diagnostic routes
pub fn diagnostic_routes(state: Arc<InterviewState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/test", get(test_handler))
        .with_state(state)
}

async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: ROOT_MESSAGE.to_string(),
    })
}

async fn test_handler(State(state): State<Arc<InterviewState>>) -> Json<DiagnosticsResponse> {
    match state.run(|service| Ok(service.diagnostics())).await {
        Ok(report) => Json(report),
        Err(e) => {
            error!(error = %e, "diagnostics task failed");
            Json(DiagnosticsResponse {
                database: format!(
                    "❌ Error: {}",
                    truncate_chars(&e.to_string(), DIAGNOSTIC_ERROR_CHARS)
                ),
                ..Default::default()
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::InterviewService;

    #[tokio::test]
    async fn test_diagnostics_without_store() {
        let state = Arc::new(InterviewState::new(InterviewService::unavailable()));
        let Json(report) = test_handler(State(state)).await;
        assert_eq!(report.backend, "✅ Running");
        assert_eq!(report.database, "⚠️ Available but not initialized");
    }

    #[tokio::test]
    async fn test_root_message() {
        let Json(body) = root_handler().await;
        assert_eq!(body.message, ROOT_MESSAGE);
    }
}
