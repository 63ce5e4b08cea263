//! interview-api - REST backend for AI-assisted candidate interviews
//!
//! Candidates, interviews and answers are validated against declared schemas
//! and persisted in a schemaless document store.

pub mod api;
pub mod cli;
pub mod http_server;
pub mod schema;
pub mod storage;
