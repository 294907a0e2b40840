//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::ApiConfig;

#[derive(Parser, Debug)]
#[command(name = "message-api")]
#[command(about = "Message ingestion and search API", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Serve the HTTP API (config from env; flags override BIND_ADDRESS and DATABASE_URL).
    Serve {
        #[arg(short, long)]
        bind: Option<String>,
        #[arg(short, long)]
        database_url: Option<String>,
    },
    /// Load and validate the configuration, then print it with the key redacted.
    CheckConfig,
}

/// Loads ApiConfig from the environment, applies overrides and validates it.
pub fn load_config(bind: Option<String>, database_url: Option<String>) -> Result<ApiConfig> {
    let config = ApiConfig::load()?.with_overrides(bind, database_url);
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_overrides() {
        let cli = Cli::try_parse_from([
            "message-api",
            "serve",
            "--bind",
            "0.0.0.0:8080",
            "--database-url",
            "memory",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Commands::Serve {
                bind: Some("0.0.0.0:8080".to_string()),
                database_url: Some("memory".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["message-api", "serve"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Serve {
                bind: None,
                database_url: None
            }
        );
    }

    #[test]
    fn test_parse_check_config() {
        let cli = Cli::try_parse_from(["message-api", "check-config"]).unwrap();
        assert_eq!(cli.command, Commands::CheckConfig);
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["message-api"]).is_err());
    }
}
