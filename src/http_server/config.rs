//! HTTP Server Configuration
//!
//! Configuration for the HTTP server including host, port, CORS settings and
//! the document store location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::api::DatabaseSettings;

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty allows any origin (default: empty)
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Directory for the file-backed store; in-memory store when unset
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Reported by diagnostics only
    #[serde(default)]
    pub database_url: Option<String>,

    /// Reported by diagnostics only
    #[serde(default)]
    pub database_name: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            data_dir: None,
            database_url: None,
            database_name: None,
        }
    }
}

impl HttpServerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Connection settings shown by `GET /test`
    pub fn database_settings(&self) -> DatabaseSettings {
        DatabaseSettings {
            url: self.database_url.clone(),
            name: self.database_name.clone(),
        }
    }
}
