//! Audioteka provider entry point
//!
//! Loads configuration, builds the provider and serves the HTTP API.

use anyhow::Context;
use audioteka_provider::config::{load_config_with_hash, validate, Config};
use audioteka_provider::server::serve;
use audioteka_provider::Provider;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Audioteka provider: book metadata lookup for cataloging clients
///
/// Scrapes the Audioteka catalog for a title and serves normalized metadata
/// on `GET /search`.
#[derive(Parser, Debug)]
#[command(name = "audioteka-provider")]
#[command(version)]
#[command(about = "Book metadata lookup backed by the Audioteka catalog", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on, overriding the configuration
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Address to bind to, overriding the configuration
    #[arg(long)]
    host: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and print the effective settings without serving
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    validate(&config).context("Invalid configuration")?;

    if cli.dry_run {
        print_dry_run(&config);
        return Ok(());
    }

    let provider = Provider::new(&config).context("Failed to build provider")?;

    serve(&config.server, Arc::new(provider))
        .await
        .context("HTTP server failed")?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("audioteka_provider=info,warn"),
            1 => EnvFilter::new("audioteka_provider=debug,tower_http=debug,info"),
            2 => EnvFilter::new("audioteka_provider=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --dry-run: shows the effective configuration
fn print_dry_run(config: &Config) {
    println!("=== Audioteka Provider Dry Run ===\n");

    println!("Server:");
    println!("  Listen: {}:{}", config.server.host, config.server.port);

    println!("\nCatalog:");
    println!("  Provider: {} ({})", config.catalog.name, config.catalog.id);
    println!("  Base URL: {}", config.catalog.base_url);
    println!("  Search path: {}", config.catalog.search_path);
    println!("  Language: {}", config.catalog.language);

    println!("\nHTTP client:");
    println!("  User agent: {}", config.http.user_agent);
    println!(
        "  Request timeout: {}",
        describe_timeout(config.http.request_timeout_secs)
    );
    println!(
        "  Connect timeout: {}",
        describe_timeout(config.http.connect_timeout_secs)
    );
    println!(
        "  Max concurrent enrichments: {}",
        config.http.max_concurrent_enrichments
    );

    let search = &config.selectors.search;
    println!("\nSearch selectors:");
    println!("  item: {}", search.item);
    println!("  title: {}", search.title);
    println!("  link: {}", search.link);
    println!("  author: {}", search.author);
    println!("  cover: {}", search.cover);
    println!("  rating: {}", search.rating);
    println!("  id attribute: {}", search.id_attribute);

    let detail = &config.selectors.detail;
    println!("\nDetail selectors:");
    println!("  row: {} / value: {} / link: {}", detail.row, detail.value, detail.value_link);
    println!(
        "  labels: narrator={}, duration={}, publisher={}, type={}, genre={}",
        detail.narrator_label,
        detail.duration_label,
        detail.publisher_label,
        detail.type_label,
        detail.genre_label
    );
    println!("  series: {}", detail.series);
    println!("  rating: {}", detail.rating);
    println!("  cover: {}", detail.cover);

    println!("\n✓ Configuration is valid");
}

fn describe_timeout(secs: Option<u64>) -> String {
    secs.map(|s| format!("{}s", s))
        .unwrap_or_else(|| "none".to_string())
}
