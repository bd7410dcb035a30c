use anyhow::Result;
use clap::{Parser, Subcommand};
use langfuse_ingest::app::ingest_use_case::{load_ingestion, IngestUseCase, PartialRejection};
use langfuse_ingest::{logging, Client, Config, Context};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Parser)]
#[command(name = "langfuse_ingest")]
#[command(about = "Submit ingestion batches to a Langfuse server")]
#[command(version = "0.1.0")]
struct Cli {
    /// Override LANGFUSE_HOST
    #[arg(long, global = true)]
    host: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit one batch of events
    Ingest {
        /// JSON file holding an ingestion document or an event array ("-" for stdin)
        #[arg(long, short)]
        file: PathBuf,
        /// Abort the request after this many seconds
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,
        /// Exit successfully even if some events were rejected
        #[arg(long)]
        allow_partial: bool,
    },
    /// Print the resolved connection settings (secret redacted)
    ShowConfig,
}

fn resolve_config(host: Option<String>) -> Config {
    let mut config = Config::from_env();
    if let Some(host) = host.filter(|h| !h.is_empty()) {
        config.host = host;
    }
    config
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let _log_guard = logging::init_logging();

    let cli = Cli::parse();
    let config = resolve_config(cli.host);
    debug!(?config, "Resolved configuration");

    match cli.command {
        Commands::Ingest {
            file,
            timeout_secs,
            allow_partial,
        } => {
            let ingestion = load_ingestion(&file)?;
            let client = Client::from_config(config);
            let use_case = IngestUseCase::new(Arc::new(client)).allow_partial(allow_partial);
            let ctx = Context::with_timeout(Duration::from_secs(timeout_secs));

            match use_case.submit(&ctx, &ingestion).await {
                Ok(response) => {
                    println!("{}", serde_json::to_string_pretty(&response)?);
                }
                Err(e) => {
                    // Rejected events still get their per-event report on stdout
                    if let Some(rejection) = e.downcast_ref::<PartialRejection>() {
                        println!("{}", serde_json::to_string_pretty(&rejection.response)?);
                    }
                    return Err(e);
                }
            }
        }
        Commands::ShowConfig => {
            println!("host:       {}", config.host);
            println!("public key: {}", config.public_key);
            if config.secret_key.is_empty() {
                println!("secret key: (unset)");
            } else {
                println!("secret key: set ({} chars)", config.secret_key.len());
            }
        }
    }

    Ok(())
}
