//! CLI command implementations

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::storage::{DocumentStore, FileDocumentStore};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Log filter used when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "interview_api=info,tower_http=info";

/// Options for the `serve` command
#[derive(Debug, Clone, Default)]
pub struct ServeOptions {
    pub host: String,
    pub port: u16,
    pub data_dir: Option<PathBuf>,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub cors_origins: Vec<String>,
}

impl ServeOptions {
    /// Server configuration for these options
    pub fn into_config(self) -> CliResult<HttpServerConfig> {
        if self.host.trim().is_empty() {
            return Err(CliError::config_error("host must not be empty"));
        }

        Ok(HttpServerConfig {
            host: self.host,
            port: self.port,
            data_dir: self.data_dir,
            database_url: self.database_url,
            database_name: self.database_name,
            cors_origins: self.cors_origins,
            ..Default::default()
        })
    }
}

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run a specific command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve {
            host,
            port,
            data_dir,
            database_url,
            database_name,
            cors_origins,
        } => serve(ServeOptions {
            host,
            port,
            data_dir,
            database_url,
            database_name,
            cors_origins,
        }),
        Command::Collections { data_dir } => collections(&data_dir, &mut io::stdout()),
    }
}

/// Start the HTTP server and block until it stops.
pub fn serve(options: ServeOptions) -> CliResult<()> {
    init_tracing();

    let config = options.into_config()?;
    let server = HttpServer::with_config(config);
    info!(addr = %server.socket_addr(), "starting interview API");

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Write the collection names of a file-backed store as a JSON array.
pub fn collections<W: Write>(data_dir: &Path, out: &mut W) -> CliResult<()> {
    if !data_dir.is_dir() {
        return Err(CliError::config_error(format!(
            "Data directory does not exist: {}",
            data_dir.display()
        )));
    }

    let store = FileDocumentStore::open(data_dir)?;
    let names = store.list_collection_names()?;
    serde_json::to_writer(&mut *out, &names)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A subscriber may already be installed (tests, embedding)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Candidate;
    use crate::storage::to_document;
    use tempfile::TempDir;

    #[test]
    fn test_collections_lists_store_contents() {
        let tmp = TempDir::new().unwrap();
        let store = FileDocumentStore::open(tmp.path()).unwrap();
        let candidate = Candidate::from_email("ada@example.com");
        store
            .create_document("candidate", to_document(&candidate).unwrap())
            .unwrap();

        let mut out = Vec::new();
        collections(tmp.path(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[\"candidate\"]\n");
    }

    #[test]
    fn test_collections_missing_dir() {
        let tmp = TempDir::new().unwrap();
        let mut out = Vec::new();
        let err = collections(&tmp.path().join("absent"), &mut out).unwrap_err();
        assert!(err.to_string().starts_with("INTERVIEW_CLI_CONFIG_ERROR: "));
    }

    #[test]
    fn test_serve_options_reject_empty_host() {
        let options = ServeOptions {
            port: 8000,
            ..Default::default()
        };
        assert!(options.into_config().is_err());
    }

    #[test]
    fn test_serve_options_into_config() {
        let config = ServeOptions {
            host: "127.0.0.1".to_string(),
            port: 9001,
            database_name: Some("interviews".to_string()),
            cors_origins: vec!["http://localhost:5173".to_string()],
            ..Default::default()
        }
        .into_config()
        .unwrap();
        assert_eq!(config.socket_addr(), "127.0.0.1:9001");
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.database_settings().name.as_deref(), Some("interviews"));
    }
}
