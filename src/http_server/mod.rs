//! # Interview API HTTP Server Module
//!
//! Combines the endpoint routers into a single Axum server with open CORS and
//! request tracing.
//!
//! # Endpoints
//!
//! - `GET /` - fixed health message
//! - `GET /test` - backend and store diagnostics
//! - `POST|GET /candidates` (also under `/api`)
//! - `POST|GET /interviews` (also under `/api`)
//! - `POST /answers` (also under `/api`)

pub mod config;
pub mod diagnostic_routes;
pub mod extract;
pub mod interview_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use extract::ValidatedJson;
pub use interview_routes::InterviewState;
pub use server::{open_store, HttpServer};
