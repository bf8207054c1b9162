use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use unsplash_mcp::config::{find_config_file, load_config, Config};
use unsplash_mcp::mcp::McpServer;
use unsplash_mcp::models::{DEFAULT_PAGE, DEFAULT_PER_PAGE};
use unsplash_mcp::rest::{self, RestState};
use unsplash_mcp::unsplash::ACCESS_KEY_ENV;
use unsplash_mcp::{PhotoSearch, SearchRequest, UnsplashClient};

/// Unsplash MCP - Search Unsplash photos from MCP clients
#[derive(Parser, Debug)]
#[command(name = "unsplash-mcp")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "MCP server for searching Unsplash photos", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve MCP over stdin/stdout (the default)
    Stdio,

    /// Serve MCP over streamable HTTP, plus the REST fallback
    Server {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port for the MCP endpoint
        #[arg(long, short)]
        port: Option<u16>,

        /// Port for the REST fallback
        #[arg(long)]
        rest_port: Option<u16>,

        /// Serve only /health on the REST port, without / and /search
        #[arg(long)]
        no_rest: bool,
    },

    /// Run a single search and print the result as JSON
    #[command(alias = "s")]
    Search {
        /// Search keyword
        query: String,

        /// Page number (1-based)
        #[arg(long, default_value_t = DEFAULT_PAGE as i64, allow_negative_numbers = true)]
        page: i64,

        /// Results per page (1-30)
        #[arg(long, default_value_t = DEFAULT_PER_PAGE as i64, allow_negative_numbers = true)]
        per_page: i64,

        /// Sort method (relevant or latest)
        #[arg(long)]
        order_by: Option<String>,

        /// Color filter
        #[arg(long)]
        color: Option<String>,

        /// Orientation filter (landscape, portrait, squarish)
        #[arg(long)]
        orientation: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    // stdout carries the MCP stream in stdio mode, so logs go to stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                format!("unsplash_mcp={0},tower_http={0}", env_filter)
            }),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = resolve_config(cli.config.as_deref())?;
    config.validate()?;

    let client = UnsplashClient::from_config(&config.unsplash)?;
    if !client.has_credentials() {
        tracing::warn!(
            "{} is not set; searches will fail until it is configured",
            ACCESS_KEY_ENV
        );
    }
    let search: Arc<dyn PhotoSearch> = Arc::new(client);

    match cli.command.unwrap_or(Commands::Stdio) {
        Commands::Stdio => {
            let server = McpServer::new(search)?;
            server.run().await?;
        }

        Commands::Server {
            host,
            port,
            rest_port,
            no_rest,
        } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let rest_port = rest_port.unwrap_or(config.server.rest_port);

            let server = McpServer::new(search.clone())?;
            let (bound_addr, mcp_handle) = server.run_http(&format!("{}:{}", host, port)).await?;
            tracing::info!("MCP server listening on {}", bound_addr);

            let state = RestState::new(search, config.server.service_name.clone());
            let app = if no_rest {
                rest::health_router(state)
            } else {
                rest::router(state)
            };
            let (_, rest_handle) = rest::start(&format!("{}:{}", host, rest_port), app).await?;

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutting down");
                }
                result = mcp_handle => {
                    result.map_err(|e| anyhow::anyhow!("MCP server task failed: {}", e))?;
                }
                result = rest_handle => {
                    result.map_err(|e| anyhow::anyhow!("REST server task failed: {}", e))??;
                }
            }
        }

        Commands::Search {
            query,
            page,
            per_page,
            order_by,
            color,
            orientation,
        } => {
            let request = SearchRequest {
                query,
                page,
                per_page,
                order_by,
                color,
                orientation,
            };
            let result = search.search_photos(&request).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

/// Load configuration from `--config`, else from the first default location found
fn resolve_config(explicit: Option<&std::path::Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return Ok(load_config(Some(path))?);
    }

    let found = find_config_file();
    if let Some(path) = &found {
        tracing::info!("Using config file: {}", path.display());
    }
    Ok(load_config(found.as_deref())?)
}
