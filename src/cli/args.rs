//! CLI argument definitions using clap
//!
//! Commands:
//! - sinaxario serve [--env-file <path>] [--host <host>] [--port <port>] [--in-memory]
//! - sinaxario ping [--env-file <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sinaxario - REST service for daily calendar records
#[derive(Parser, Debug)]
#[command(name = "sinaxario")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Connect to the store and serve the HTTP API
    Serve {
        /// dotenv file to load (default: ./.env when present)
        #[arg(long)]
        env_file: Option<PathBuf>,

        /// Host to bind, overrides HTTP_HOST
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overrides HTTP_PORT
        #[arg(long)]
        port: Option<u16>,

        /// Serve from a process-local store instead of MongoDB
        #[arg(long)]
        in_memory: bool,
    },

    /// Connect to the store, ping it, and exit
    Ping {
        /// dotenv file to load (default: ./.env when present)
        #[arg(long)]
        env_file: Option<PathBuf>,
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
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["sinaxario", "serve", "--port", "9000", "--in-memory"])
            .unwrap();
        match cli.command {
            Command::Serve { port, in_memory, env_file, host } => {
                assert_eq!(port, Some(9000));
                assert!(in_memory);
                assert!(env_file.is_none());
                assert!(host.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_ping_with_env_file() {
        let cli = Cli::try_parse_from(["sinaxario", "ping", "--env-file", "prod.env"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Ping { env_file: Some(ref p) } if p == &PathBuf::from("prod.env")
        ));
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(Cli::try_parse_from(["sinaxario", "serve", "--port", "99999"]).is_err());
    }
}
