//! CLI argument definitions using clap
//!
//! Commands:
//! - interview-api serve [--host] [--port] [--data-dir] [--cors-origin ...]
//! - interview-api collections --data-dir <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Interview API - REST backend for AI-assisted candidate interviews
#[derive(Parser, Debug)]
#[command(name = "interview-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long, env = "HOST", default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = 8000)]
        port: u16,

        /// Directory for the file-backed store (in-memory when omitted)
        #[arg(long, env = "DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// Connection string reported by `GET /test`
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,

        /// Database name reported by `GET /test`
        #[arg(long, env = "DATABASE_NAME")]
        database_name: Option<String>,

        /// Allowed CORS origin, repeatable (any origin when omitted)
        #[arg(long = "cors-origin", env = "CORS_ORIGINS", value_delimiter = ',')]
        cors_origins: Vec<String>,
    },

    /// Print the collection names held in a file-backed store
    Collections {
        /// Directory of the file-backed store
        #[arg(long, env = "DATA_DIR")]
        data_dir: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from([
            "interview-api",
            "serve",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--data-dir",
            "/tmp/interviews",
        ])
        .unwrap();

        match cli.command {
            Command::Serve {
                host,
                port,
                data_dir,
                ..
            } => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(port, 9000);
                assert_eq!(data_dir, Some(PathBuf::from("/tmp/interviews")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cors_origins_repeat_and_split() {
        let cli = Cli::try_parse_from([
            "interview-api",
            "serve",
            "--cors-origin",
            "http://localhost:5173",
            "--cors-origin",
            "https://app.example,https://admin.example",
        ])
        .unwrap();

        match cli.command {
            Command::Serve { cors_origins, .. } => assert_eq!(
                cors_origins,
                vec![
                    "http://localhost:5173",
                    "https://app.example",
                    "https://admin.example"
                ]
            ),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(Cli::try_parse_from(["interview-api", "serve", "--port", "http"]).is_err());
    }
}
