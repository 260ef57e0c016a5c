//! CLI command implementations

use clap::Subcommand;
use shophound_core::config::SearchConfig;
use shophound_core::types::{ProviderScope, SearchRequest};
use shophound_search::SearchAggregator;

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the aggregation API server
    Server {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
    /// Run one aggregated search and print the JSON payload
    Search {
        /// Free-text product query
        query: String,
        /// Page number
        #[arg(short, long, default_value = "1")]
        page: u32,
        /// Provider tag or "all"
        #[arg(long, default_value = "all")]
        provider: String,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns appropriate error based on the command that fails
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Server { host, port } => start_server(host, port).await,
        Commands::Search {
            query,
            page,
            provider,
        } => run_search(query, page, provider).await,
    }
}

/// Start the aggregation API server.
async fn start_server(host: String, port: u16) -> anyhow::Result<()> {
    let config = SearchConfig::from_env();

    println!("Starting Shophound API server...");
    println!("Endpoint: http://{host}:{port}/api/search");
    println!("Health:   http://{host}:{port}/health");
    println!();
    println!("Press Ctrl+C to stop the server");

    shophound_web::run_server(config, &host, port)
        .await
        .map_err(|e| anyhow::anyhow!("Server failed: {e}"))
}

/// Run a single search against the configured providers.
async fn run_search(query: String, page: u32, provider: String) -> anyhow::Result<()> {
    let config = SearchConfig::from_env();
    let aggregator = SearchAggregator::from_config(&config).await;

    let scope: ProviderScope = provider
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let request = SearchRequest::new(query, page.max(1), scope);

    let response = aggregator.search(&request).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
