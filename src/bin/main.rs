//! SearXNG proxy CLI - MCP stdio server plus one-shot search commands
//!
//! The `serve` subcommand runs the MCP server; `search` runs a single query
//! from the command line and prints the formatted payload; `resolve` prints
//! the endpoint the process would use, which is handy for checking random
//! instance selection before wiring the server into a client.

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use searxng_mcp::config::Config;
use searxng_mcp::gateway::{SearchGateway, USER_AGENT};
use searxng_mcp::types::{OutputFormat, SearchArgs};
use searxng_mcp::{run_search, server};
use serde_json::{Map, Value};

#[derive(Parser)]
#[command(name = "searxng-mcp")]
#[command(about = "SearXNG metasearch proxy (MCP stdio server + CLI)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run as an MCP stdio server advertising the searxngsearch tool
    Serve {
        /// Output encoding for tool responses
        #[arg(short, long, value_enum, default_value = "markdown", env = "SEARXNG_FORMAT")]
        format: FormatCli,
    },
    /// Run a single search and print the formatted payload
    Search {
        /// Search query
        query: String,

        /// Language code (e.g. en, de, fr)
        #[arg(short, long)]
        language: Option<String>,

        /// Time window: day, week, month or year
        #[arg(short, long)]
        time_range: Option<String>,

        /// Comma-separated result categories (e.g. general,news)
        #[arg(short, long)]
        categories: Option<String>,

        /// Comma-separated engines (e.g. duckduckgo,brave)
        #[arg(short, long)]
        engines: Option<String>,

        /// Safe search level: 0, 1 or 2
        #[arg(short, long)]
        safesearch: Option<u8>,

        /// Result page to request
        #[arg(short, long)]
        pageno: Option<u32>,

        /// Maximum number of results to print (1-50)
        #[arg(short, long)]
        max_results: Option<u32>,

        /// Output encoding
        #[arg(short, long, value_enum, default_value = "markdown", env = "SEARXNG_FORMAT")]
        format: FormatCli,
    },
    /// Resolve and print the endpoint this process would use
    Resolve,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatCli {
    Markdown,
    Json,
}

impl From<FormatCli> for OutputFormat {
    fn from(format: FormatCli) -> Self {
        match format {
            FormatCli::Markdown => OutputFormat::Markdown,
            FormatCli::Json => OutputFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(error) = run(cli).await {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_env();
    let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

    match cli.command {
        Commands::Serve { format } => {
            // Startup barrier: resolve once, fatally, before accepting calls.
            let endpoint = config.resolve_endpoint(&client).await?;
            log::info!("serving searxngsearch against {}", endpoint.base_url());
            let gateway = SearchGateway::with_timeout(endpoint, config.timeout_ms)?;
            server::serve_stdio(gateway, format.into())
                .await
                .map_err(|e| anyhow::anyhow!(e.to_string()))?;
        }
        Commands::Search {
            query,
            language,
            time_range,
            categories,
            engines,
            safesearch,
            pageno,
            max_results,
            format,
        } => {
            let endpoint = config.resolve_endpoint(&client).await?;
            let gateway = SearchGateway::with_timeout(endpoint, config.timeout_ms)?;
            let args = to_search_args(
                query,
                language,
                time_range,
                categories,
                engines,
                safesearch,
                pageno,
                max_results,
            );
            let text = run_search(&gateway, &args, format.into()).await?;
            println!("{text}");
        }
        Commands::Resolve => {
            let endpoint = config.resolve_endpoint(&client).await?;
            println!(
                "{} {}",
                "endpoint:".green().bold(),
                endpoint.base_url()
            );
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn to_search_args(
    query: String,
    language: Option<String>,
    time_range: Option<String>,
    categories: Option<String>,
    engines: Option<String>,
    safesearch: Option<u8>,
    pageno: Option<u32>,
    max_results: Option<u32>,
) -> SearchArgs {
    let mut raw = Map::new();
    raw.insert("query".to_string(), Value::String(query));
    if let Some(language) = language {
        raw.insert("language".to_string(), Value::String(language));
    }
    if let Some(time_range) = time_range {
        raw.insert("time_range".to_string(), Value::String(time_range));
    }
    if let Some(categories) = categories {
        raw.insert("categories".to_string(), csv_to_array(&categories));
    }
    if let Some(engines) = engines {
        raw.insert("engines".to_string(), csv_to_array(&engines));
    }
    if let Some(safesearch) = safesearch {
        raw.insert("safesearch".to_string(), Value::from(safesearch));
    }
    if let Some(pageno) = pageno {
        raw.insert("pageno".to_string(), Value::from(pageno));
    }
    if let Some(max_results) = max_results {
        raw.insert("max_results".to_string(), Value::from(max_results));
    }
    // The args struct accepts any JSON object; normalization happens in build.
    serde_json::from_value(Value::Object(raw)).unwrap_or_default()
}

fn csv_to_array(csv: &str) -> Value {
    Value::Array(
        csv.split(',')
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(|item| Value::String(item.to_string()))
            .collect(),
    )
}
