// src/main.rs

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};

use review_scraper::crawler::datascraper::Scraper;
use review_scraper::crawler::{CrawlOutcome, Crawler, LogProgress};
use review_scraper::interrupt::run_until_interrupted;
use review_scraper::request::ScrapeRequest;
use review_scraper::settings::Settings;
use review_scraper::sites::SiteAdapter;
use review_scraper::store;

#[derive(Parser)]
#[command(
    name = "review_scraper",
    about = "Scrape SaaS product reviews from G2, Capterra and GetApp into a JSON file",
    after_help = "Date formats: 2024-01-15, January 15, 2024, 01/15/2024, Jan 15, 2024, 15 January 2024\n\n\
                  Example:\n  review_scraper --company hubspot --start-date 2024-01-01 --end-date 2024-12-31 --source g2"
)]
struct Cli {
    /// Company name or product slug as the site spells it (e.g. "hubspot")
    #[arg(long)]
    company: String,
    /// First day of the review window (inclusive)
    #[arg(long, value_name = "DATE")]
    start_date: String,
    /// Last day of the review window (inclusive)
    #[arg(long, value_name = "DATE")]
    end_date: String,
    /// g2, capterra or getapp
    #[arg(long)]
    source: String,
    /// Output JSON file (default: {company}_{source}_reviews_{start}_{end}.json)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Debug logging and full error chains
    #[arg(short, long)]
    verbose: bool,
}

/// The main entry point: validate, crawl, export.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let verbose = cli.verbose;

    match run_until_interrupted(run(cli), tokio::signal::ctrl_c()).await {
        Some(Ok(())) => ExitCode::SUCCESS,
        Some(Err(e)) => {
            if verbose {
                error!("{e:?}");
            } else {
                error!("{e:#}");
            }
            ExitCode::FAILURE
        }
        None => {
            warn!("Scraping interrupted by user, nothing written");
            ExitCode::SUCCESS
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "review_scraper=debug,info" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()),
        )
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let request = ScrapeRequest::parse(&cli.company, &cli.start_date, &cli.end_date, &cli.source)
        .context("invalid input")?;
    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(request.default_output_file()));
    let settings = Settings::load().context("failed to load settings")?;

    info!(
        company = request.company(),
        source = %request.source(),
        start = %request.start(),
        end = %request.end(),
        "Scraping reviews"
    );

    let scraper = Scraper::new(&settings).context("failed to build HTTP client")?;
    let crawler = Crawler::new(scraper, settings.delay());
    let report = crawler
        .run(&request, SiteAdapter::for_source(request.source()), &mut LogProgress)
        .await?;

    if let CrawlOutcome::Interrupted(err) = &report.outcome {
        warn!(
            page = report.pages,
            kept = report.records.len(),
            "Stopped early: {err}; keeping reviews collected so far"
        );
    }

    if report.records.is_empty() {
        warn!(
            "No reviews found for '{}' from {} to {}. The company slug may be wrong, \
             the range may be outside the available reviews, or the site's markup may have changed",
            request.company(),
            request.start(),
            request.end(),
        );
        return Ok(());
    }

    store::save_reviews(&output, &report.records)
        .with_context(|| format!("failed to write {}", output.display()))?;

    print_summary(&request, report.records.len(), &output);
    Ok(())
}

fn print_summary(request: &ScrapeRequest, total: usize, output: &std::path::Path) {
    println!("\n{}", "=".repeat(50));
    println!("SCRAPING COMPLETED");
    println!("{}", "=".repeat(50));
    println!("Company:       {}", request.company());
    println!("Source:        {}", request.source());
    println!("Date Range:    {} to {}", request.start(), request.end());
    println!("Total Reviews: {total}");
    println!("Output File:   {}", output.display());
    println!("{}\n", "=".repeat(50));
}
