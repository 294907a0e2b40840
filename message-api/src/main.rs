use anyhow::Result;
use clap::Parser;
use message_api::{load_config, serve, Cli, Commands};
use message_core::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, database_url } => {
            let config = load_config(bind, database_url)?;
            init_tracing(config.log_file.as_deref())?;
            info!(version = env!("CARGO_PKG_VERSION"), "message-api starting");
            serve(config).await
        }
        Commands::CheckConfig => {
            let config = load_config(None, None)?;
            println!("{:#?}", config);
            Ok(())
        }
    }
}
