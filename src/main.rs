use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use compendium::config::Settings;
use compendium::gateway::{ItemRequest, ListRequest, QueryGateway, SearchRequest, ServingStatus};
use compendium::source::{EndpointRegistry, HttpItemSource, ItemSource};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "compendium",
    version,
    about = "Search and browse the 5e ruleset reference catalog"
)]
struct Cli {
    /// Settings file (defaults to ./compendium.toml when present)
    #[arg(long, global = true, env = "COMPENDIUM_CONFIG")]
    config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the known endpoints
    Endpoints,
    /// Show one page of an endpoint's items
    List {
        endpoint: String,

        #[arg(long, default_value_t = 0)]
        page: usize,

        #[arg(long, default_value_t = 20)]
        page_size: usize,
    },
    /// Fetch one item's full record
    Get { endpoint: String, index: String },
    /// Search item names and indexes
    Search {
        query: String,

        /// Restrict to these endpoints (repeatable; default: all)
        #[arg(short, long = "endpoint")]
        endpoints: Vec<String>,

        /// Maximum number of results
        #[arg(short = 'n', long)]
        max_results: Option<usize>,
    },
    /// Report service health
    Health,
    /// Warm the cache and print per-endpoint item counts
    Preload { endpoints: Vec<String> },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    init_tracing(&settings);

    let registry: Arc<dyn EndpointRegistry> = Arc::new(settings.registry());
    let source: Arc<dyn ItemSource> = Arc::new(
        HttpItemSource::from_settings(&settings, Arc::clone(&registry))
            .context("building http client")?,
    );
    let gateway = QueryGateway::new(source, registry)
        .with_default_max_results(settings.default_max_results);

    if settings.preload_on_start {
        gateway.engine().preload(&settings.preload);
    }

    match cli.command {
        Commands::Endpoints => {
            let response = gateway.endpoints();
            emit(cli.json, &response, || response.endpoints.join("\n"))
        }
        Commands::List {
            endpoint,
            page,
            page_size,
        } => {
            let request = ListRequest::new(endpoint).page(page).page_size(page_size);
            let response = gateway.list(&request)?;
            emit(cli.json, &response, || {
                let mut out: Vec<String> = response
                    .items
                    .iter()
                    .map(|item| format!("{:<32} {}", item.index, item.name))
                    .collect();
                out.push(format!(
                    "-- page {} ({} of {} items{})",
                    response.page,
                    response.items.len(),
                    response.total_count,
                    if response.has_more { ", more available" } else { "" }
                ));
                out.join("\n")
            })
        }
        Commands::Get { endpoint, index } => {
            let response = gateway.item(&ItemRequest { endpoint, index })?;
            if cli.json {
                println!("{}", response.raw_data);
                return Ok(());
            }
            let record: serde_json::Value = serde_json::from_str(&response.raw_data)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        Commands::Search {
            query,
            endpoints,
            max_results,
        } => {
            let mut request = SearchRequest::new(query).endpoints(endpoints);
            request.max_results = max_results;
            let response = gateway.search(&request)?;
            emit(cli.json, &response, || {
                let mut out: Vec<String> = response
                    .results
                    .iter()
                    .map(|hit| {
                        format!(
                            "{:.2}  {:<22} {:<32} {} [{}]",
                            hit.relevance_score,
                            hit.endpoint,
                            hit.item.index,
                            hit.item.name,
                            hit.matched_field
                        )
                    })
                    .collect();
                out.push(format!("-- {} results for {:?}", response.total_found, response.query));
                out.join("\n")
            })
        }
        Commands::Health => {
            let response = gateway.health();
            emit(cli.json, &response, || response.message.clone())?;
            if response.status == ServingStatus::NotServing {
                anyhow::bail!("service is not serving");
            }
            Ok(())
        }
        Commands::Preload { endpoints } => {
            let report = gateway.engine().preload(&endpoints);
            let stats = gateway.engine().cache_stats();
            emit(cli.json, &stats, || {
                let mut out: Vec<String> = stats
                    .iter()
                    .map(|(endpoint, count)| format!("{endpoint:<22} {count}"))
                    .collect();
                for endpoint in &report.failed {
                    out.push(format!("{endpoint:<22} failed"));
                }
                out.join("\n")
            })
        }
    }
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}
