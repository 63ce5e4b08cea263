//! # HTTP Server
//!
//! Main HTTP server combining the diagnostic and interview routers.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::api::InterviewService;
use crate::storage::{DocumentStore, FileDocumentStore, InMemoryDocumentStore, StoreResult};

use super::config::HttpServerConfig;
use super::diagnostic_routes::diagnostic_routes;
use super::interview_routes::{interview_routes, InterviewState};

/// HTTP Server for the interview API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server whose store is chosen by `config.data_dir`.
    ///
    /// A store that cannot be opened does not stop the server: it starts
    /// without one, `GET /test` reports the store as not initialized and
    /// entity endpoints answer 500.
    pub fn with_config(config: HttpServerConfig) -> Self {
        let service = match open_store(&config) {
            Ok(store) => InterviewService::new(store),
            Err(e) => {
                error!(error = %e, "document store unavailable, serving without it");
                InterviewService::unavailable()
            }
        }
        .with_settings(config.database_settings());

        Self::with_service(config, service)
    }

    /// Create a server around an already-built service
    pub fn with_service(config: HttpServerConfig, service: InterviewService) -> Self {
        let router = Self::build_router(&config, service);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, service: InterviewService) -> Router {
        let state = Arc::new(InterviewState::new(service));

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| match s.parse::<HeaderValue>() {
                    Ok(origin) => Some(origin),
                    Err(_) => {
                        warn!(origin = %s, "ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            // `/` and `/test`
            .merge(diagnostic_routes(state.clone()))
            .merge(interview_routes(state.clone()))
            .nest("/api", interview_routes(state))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "interview API listening");
        match &self.config.data_dir {
            Some(dir) => info!(data_dir = %dir.display(), "using file-backed store"),
            None => info!("using in-memory store"),
        }
        if !self.config.cors_origins.is_empty() {
            info!(origins = ?self.config.cors_origins, "CORS restricted");
        }

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

/// Opens the store selected by the configuration
pub fn open_store(config: &HttpServerConfig) -> StoreResult<Arc<dyn DocumentStore>> {
    Ok(match &config.data_dir {
        Some(dir) => Arc::new(FileDocumentStore::open(dir)?),
        None => Arc::new(InMemoryDocumentStore::new()),
    })
}
