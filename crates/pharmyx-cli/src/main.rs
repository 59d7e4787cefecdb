//! Pharmyx — find PubMed papers with pharmaceutical/biotech-affiliated authors.
//! Entry point for the command-line binary.

mod config;

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pharmyx_ingestion::classify::AffiliationClassifier;
use pharmyx_ingestion::pipeline::run_pipeline;
use pharmyx_ingestion::report::{print_rows, write_csv_file};
use pharmyx_ingestion::sources::pubmed::PubMedClient;

/// Fetch and filter PubMed papers based on a query.
#[derive(Debug, Parser)]
#[command(name = "pharmyx", version, about)]
struct Cli {
    /// Search query for PubMed, passed through verbatim.
    query: String,

    /// Filename to save results as CSV. If not provided, prints to console.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Enable debug mode.
    #[arg(short, long)]
    debug: bool,

    /// Maximum number of PubMed results (overrides pharmyx.toml).
    #[arg(long)]
    max_results: Option<usize>,
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("pharmyx=debug,info")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("pharmyx=info,warn"))
    };

    // stdout carries report rows only
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let config = config::Config::load()?;
    info!(
        "Configuration loaded. Contact: {}, match mode: {:?}",
        config.pubmed.contact_email, config.classification.match_mode
    );

    let classifier = AffiliationClassifier::with_mode(config.classification.match_mode)?;
    let client = PubMedClient::new(config.pubmed_config())?;
    let max_results = cli.max_results.unwrap_or(config.pubmed.max_results);

    let debug = cli.debug;
    if debug {
        eprintln!("[DEBUG] Query: {}", cli.query);
    }

    let result = run_pipeline(&client, &classifier, &cli.query, max_results, |ids| {
        if debug {
            eprintln!("[DEBUG] Found {} PubMed IDs", ids.len());
        }
    })
    .await?;

    match cli.file {
        Some(path) => {
            let written = write_csv_file(&path, &result.rows)?;
            println!("Saved {} papers to {}", written, path.display());
        }
        None => print_rows(std::io::stdout().lock(), &result.rows)?,
    }

    Ok(())
}
