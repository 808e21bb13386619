//! News curator binary: fetch feeds, score for stock impact, render a report.
//!
//! See `README.md` for configuration files and environment variables.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use news_stock_curator::analyze::keywords::load_keywords_default;
use news_stock_curator::curate::default_output_path;
use news_stock_curator::ingest::config::load_registry_default;
use news_stock_curator::logging::init_tracing;
use news_stock_curator::{
    categorize, CategoryMap, Curator, Fetcher, OutputFormat, ScoredItem, Scorer,
};

#[derive(Debug, Parser)]
#[command(
    name = "news-curator",
    version,
    about = "Collect world news likely to move stock prices and render a curated report"
)]
struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Console)]
    format: OutputFormat,

    /// Output file (file formats only; defaults to a timestamped name)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum news age in hours
    #[arg(short = 't', long, default_value_t = 24)]
    hours: u32,

    /// Minimum impact score to keep an item
    #[arg(short = 's', long, default_value_t = 10)]
    min_score: u8,

    /// Items listed per category
    #[arg(short, long, default_value_t = 10)]
    max_per_category: usize,

    /// Debug logging and a statistics block at the end
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env if present; CURATOR_* paths and RUST_LOG may live there.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = ?e, "curation failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let registry = load_registry_default()?;
    let keywords = load_keywords_default()?;
    let scorer = Scorer::new(&keywords)?;

    println!("{}", "=".repeat(60));
    println!("  Stock-Moving News Curator");
    println!("{}", "=".repeat(60));

    let fetcher = Fetcher::from_registry(&registry)?;
    let all_news = fetcher.fetch_all(cli.hours).await?;
    let fetched = all_news.len();

    println!("\nAnalyzing news...");
    let stock_news = scorer.filter_stock_related(all_news, cli.min_score);
    let categories = categorize(&stock_news);
    println!("Stock-related news: {} item(s)", stock_news.len());

    let curator = Curator::new(cli.max_per_category);
    let generated_at = chrono::Local::now().naive_local();
    let rendered = curator.render(cli.format, &stock_news, Some(&categories), generated_at)?;

    match cli.output.clone().or_else(|| default_output_path(cli.format, generated_at)) {
        None => println!("{rendered}"),
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("writing report to {}", path.display()))?;
            tracing::info!(path = %path.display(), format = ?cli.format, "report written");
            println!("\nOutput file: {}", path.display());
            println!("Format: {:?}", cli.format);
        }
    }

    if cli.verbose {
        print_stats(fetched, &stock_news, &categories);
    }

    println!("\nDone.");
    Ok(())
}

fn print_stats(fetched: usize, stock_news: &[ScoredItem], categories: &CategoryMap) {
    println!("\n--- Statistics ---");
    println!("Fetched news: {fetched}");
    println!("Stock-related news: {}", stock_news.len());
    // fetch_all never returns an empty list, so `fetched > 0`
    let rate = stock_news.len() as f64 / fetched.max(1) as f64 * 100.0;
    println!("Filter rate: {rate:.1}%");

    println!("\nBy category:");
    for (category, items) in categories.by_count_desc() {
        let avg = if items.is_empty() {
            0.0
        } else {
            items.iter().map(|i| f64::from(i.impact_score)).sum::<f64>() / items.len() as f64
        };
        println!("  {category}: {} (avg score: {avg:.1})", items.len());
    }
}
